//! Enemy records
//!
//! An enemy is a common core (name, stats, sprite) plus up to five optional
//! capability groups. Each group is either entirely present or entirely absent,
//! which the stored representation enforces by construction: a group is an
//! `Option<…Capability>` whose struct has no optional members.
//!
//! On the wire the record is flat. `to_fields` flattens it (absent groups become
//! nulls) and `assemble` rebuilds it from a flat `FieldSet`, failing on any group
//! that is only partly supplied.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};

use crate::common::errors::ValidationError;
use crate::common::fields::FieldSet;

pub const CORE_FIELDS: [&str; 7] = [
    "name",
    "health",
    "speed",
    "damage",
    "score",
    "attack_speed",
    "sprite",
];

pub const RANGED_FIELDS: [&str; 5] = [
    "projectile_sprite",
    "projectile_sound",
    "projectile_speed",
    "range",
    "fire_rate",
];

pub const HEALER_FIELDS: [&str; 3] = ["heal_amount", "heal_rate", "heal_range"];

pub const BARRIER_FIELDS: [&str; 5] = [
    "barrier_health",
    "barrier_cooldown",
    "barrier_regen",
    "barrier_regen_cooldown",
    "barrier_radius",
];

pub const CLOAK_FIELDS: [&str; 5] = [
    "cloak_duration",
    "cloak_radius",
    "cloak_cooldown",
    "timer_based",
    "proximity_based",
];

pub const SPAWNER_FIELDS: [&str; 1] = ["spawn_rate"];

/// The five optional behaviours, in their canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityKind {
    Ranged,
    Healer,
    Barrier,
    Cloak,
    Spawner,
}

impl CapabilityKind {
    pub const ALL: [CapabilityKind; 5] = [
        CapabilityKind::Ranged,
        CapabilityKind::Healer,
        CapabilityKind::Barrier,
        CapabilityKind::Cloak,
        CapabilityKind::Spawner,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CapabilityKind::Ranged => "ranged",
            CapabilityKind::Healer => "healer",
            CapabilityKind::Barrier => "barrier",
            CapabilityKind::Cloak => "cloak",
            CapabilityKind::Spawner => "spawner",
        }
    }

    pub fn field_names(&self) -> &'static [&'static str] {
        match self {
            CapabilityKind::Ranged => &RANGED_FIELDS,
            CapabilityKind::Healer => &HEALER_FIELDS,
            CapabilityKind::Barrier => &BARRIER_FIELDS,
            CapabilityKind::Cloak => &CLOAK_FIELDS,
            CapabilityKind::Spawner => &SPAWNER_FIELDS,
        }
    }

    /// Rejection message for a group that is only partly supplied
    pub fn incomplete_message(&self) -> &'static str {
        match self {
            CapabilityKind::Ranged => {
                "For ranged enemies the following fields must have a value after creation or update operations: projectile_sprite, projectile_sound, projectile_speed, range, and fire_rate must all be provided"
            }
            CapabilityKind::Healer => {
                "For healer enemies the following fields must have a value after creation or update operations: heal_amount, heal_rate, and heal_range must all be provided"
            }
            CapabilityKind::Barrier => {
                "For barrier enemies the following fields must have a value after creation or update operations: barrier_health, barrier_cooldown, barrier_regen, barrier_regen_cooldown, and barrier_radius must all be provided"
            }
            CapabilityKind::Cloak => {
                "For cloak enemies the following fields must have a value after creation or update operations: cloak_duration, cloak_radius, cloak_cooldown must all be provided, and either timer_based or proximity_based must be set to true"
            }
            CapabilityKind::Spawner => {
                "For spawner enemies the following fields must have a value after creation or update operations: spawn_rate must be provided"
            }
        }
    }
}

impl std::fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoreStats {
    pub name: String,
    pub health: Number,
    pub speed: Number,
    pub damage: Number,
    pub score: Number,
    pub attack_speed: Number,
    pub sprite: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangedCapability {
    pub projectile_sprite: String,
    pub projectile_sound: String,
    pub projectile_speed: Number,
    pub range: Number,
    pub fire_rate: Number,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HealerCapability {
    pub heal_amount: Number,
    pub heal_rate: Number,
    pub heal_range: Number,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarrierCapability {
    pub health: Number,
    pub cooldown: Number,
    pub regen: Number,
    pub regen_cooldown: Number,
    pub radius: Number,
}

/// Cloaking; at least one of the two triggers is always on
#[derive(Debug, Clone, PartialEq)]
pub struct CloakCapability {
    pub duration: Number,
    pub radius: Number,
    pub cooldown: Number,
    pub timer_based: bool,
    pub proximity_based: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpawnerCapability {
    pub spawn_rate: Number,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Capability {
    Ranged(RangedCapability),
    Healer(HealerCapability),
    Barrier(BarrierCapability),
    Cloak(CloakCapability),
    Spawner(SpawnerCapability),
}

impl Capability {
    pub fn kind(&self) -> CapabilityKind {
        match self {
            Capability::Ranged(_) => CapabilityKind::Ranged,
            Capability::Healer(_) => CapabilityKind::Healer,
            Capability::Barrier(_) => CapabilityKind::Barrier,
            Capability::Cloak(_) => CapabilityKind::Cloak,
            Capability::Spawner(_) => CapabilityKind::Spawner,
        }
    }
}

/// One slot per capability kind
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Capabilities {
    pub ranged: Option<RangedCapability>,
    pub healer: Option<HealerCapability>,
    pub barrier: Option<BarrierCapability>,
    pub cloak: Option<CloakCapability>,
    pub spawner: Option<SpawnerCapability>,
}

impl Capabilities {
    pub fn is_present(&self, kind: CapabilityKind) -> bool {
        match kind {
            CapabilityKind::Ranged => self.ranged.is_some(),
            CapabilityKind::Healer => self.healer.is_some(),
            CapabilityKind::Barrier => self.barrier.is_some(),
            CapabilityKind::Cloak => self.cloak.is_some(),
            CapabilityKind::Spawner => self.spawner.is_some(),
        }
    }

    pub fn get(&self, kind: CapabilityKind) -> Option<Capability> {
        match kind {
            CapabilityKind::Ranged => self.ranged.clone().map(Capability::Ranged),
            CapabilityKind::Healer => self.healer.clone().map(Capability::Healer),
            CapabilityKind::Barrier => self.barrier.clone().map(Capability::Barrier),
            CapabilityKind::Cloak => self.cloak.clone().map(Capability::Cloak),
            CapabilityKind::Spawner => self.spawner.clone().map(Capability::Spawner),
        }
    }

    /// Place a capability in its slot, replacing any previous one
    pub fn insert(&mut self, capability: Capability) {
        match capability {
            Capability::Ranged(c) => self.ranged = Some(c),
            Capability::Healer(c) => self.healer = Some(c),
            Capability::Barrier(c) => self.barrier = Some(c),
            Capability::Cloak(c) => self.cloak = Some(c),
            Capability::Spawner(c) => self.spawner = Some(c),
        }
    }

    /// Present capabilities in canonical order
    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        CapabilityKind::ALL
            .into_iter()
            .filter_map(move |kind| self.get(kind))
    }

    pub fn kinds(&self) -> Vec<CapabilityKind> {
        self.iter().map(|c| c.kind()).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnemyRecord {
    pub id: u64,
    /// Free-form tag, not interpreted by the service
    pub kind: Option<String>,
    pub core: CoreStats,
    pub sound: Option<String>,
    pub capabilities: Capabilities,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EnemyRecord {
    /// Build a record from a flat field set
    ///
    /// The field set is expected to have passed validation already; this only
    /// enforces the structural rules (types, group completeness, cloak activation)
    /// so that no inconsistent record can ever be constructed.
    pub fn assemble(
        id: u64,
        fields: &FieldSet,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let core = CoreStats {
            name: core_text(fields, "name")?,
            health: core_number(fields, "health")?,
            speed: core_number(fields, "speed")?,
            damage: core_number(fields, "damage")?,
            score: core_number(fields, "score")?,
            attack_speed: core_number(fields, "attack_speed")?,
            sprite: core_text(fields, "sprite")?,
        };

        let capabilities = Capabilities {
            ranged: read_group::<RangedCapability>(fields)?,
            healer: read_group::<HealerCapability>(fields)?,
            barrier: read_group::<BarrierCapability>(fields)?,
            cloak: read_group::<CloakCapability>(fields)?,
            spawner: read_group::<SpawnerCapability>(fields)?,
        };

        Ok(Self {
            id,
            kind: optional_text(fields, "type")?,
            core,
            sound: optional_text(fields, "sound")?,
            capabilities,
            created_at,
            updated_at,
        })
    }

    /// Apply a partial update: present values in `patch` replace stored ones
    pub fn merged_with(
        &self,
        patch: &FieldSet,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let mut patch = patch.clone();
        for key in ["id", "created_at", "updated_at"] {
            patch.remove(key);
        }
        let merged = patch.merged_over(&self.to_fields());
        Self::assemble(self.id, &merged, self.created_at, updated_at)
    }

    /// Flat representation; every known field is present, absent groups as null
    pub fn to_fields(&self) -> FieldSet {
        let mut fields = FieldSet::new();
        fields.insert("id", self.id);
        fields.insert("type", opt_value(self.kind.as_deref()));
        fields.insert("name", self.core.name.as_str());
        fields.insert("health", self.core.health.clone());
        fields.insert("speed", self.core.speed.clone());
        fields.insert("damage", self.core.damage.clone());
        fields.insert("score", self.core.score.clone());
        fields.insert("attack_speed", self.core.attack_speed.clone());
        fields.insert("sprite", self.core.sprite.as_str());
        fields.insert("sound", opt_value(self.sound.as_deref()));

        write_group(self.capabilities.ranged.as_ref(), &mut fields);
        write_group(self.capabilities.healer.as_ref(), &mut fields);
        write_group(self.capabilities.barrier.as_ref(), &mut fields);
        write_group(self.capabilities.cloak.as_ref(), &mut fields);
        write_group(self.capabilities.spawner.as_ref(), &mut fields);

        fields.insert("created_at", self.created_at.to_rfc3339());
        fields.insert("updated_at", self.updated_at.to_rfc3339());
        fields
    }
}

impl Serialize for EnemyRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_fields().serialize(serializer)
    }
}

/// A capability group's mapping to and from flat fields
trait FlatGroup: Sized {
    const KIND: CapabilityKind;

    fn read(fields: &FieldSet) -> Result<Self, ValidationError>;

    fn write(&self, fields: &mut FieldSet);
}

/// A group with nothing set (all null, zero, blank or `false`) is absent
fn read_group<G: FlatGroup>(fields: &FieldSet) -> Result<Option<G>, ValidationError> {
    if !fields.any_set(G::KIND.field_names()) {
        return Ok(None);
    }
    G::read(fields).map(Some)
}

fn write_group<G: FlatGroup>(group: Option<&G>, fields: &mut FieldSet) {
    match group {
        Some(group) => group.write(fields),
        None => {
            for name in G::KIND.field_names() {
                fields.insert(*name, Value::Null);
            }
        }
    }
}

impl FlatGroup for RangedCapability {
    const KIND: CapabilityKind = CapabilityKind::Ranged;

    fn read(fields: &FieldSet) -> Result<Self, ValidationError> {
        Ok(Self {
            projectile_sprite: group_text(fields, Self::KIND, "projectile_sprite")?,
            projectile_sound: group_text(fields, Self::KIND, "projectile_sound")?,
            projectile_speed: group_number(fields, Self::KIND, "projectile_speed")?,
            range: group_number(fields, Self::KIND, "range")?,
            fire_rate: group_number(fields, Self::KIND, "fire_rate")?,
        })
    }

    fn write(&self, fields: &mut FieldSet) {
        fields.insert("projectile_sprite", self.projectile_sprite.as_str());
        fields.insert("projectile_sound", self.projectile_sound.as_str());
        fields.insert("projectile_speed", self.projectile_speed.clone());
        fields.insert("range", self.range.clone());
        fields.insert("fire_rate", self.fire_rate.clone());
    }
}

impl FlatGroup for HealerCapability {
    const KIND: CapabilityKind = CapabilityKind::Healer;

    fn read(fields: &FieldSet) -> Result<Self, ValidationError> {
        Ok(Self {
            heal_amount: group_number(fields, Self::KIND, "heal_amount")?,
            heal_rate: group_number(fields, Self::KIND, "heal_rate")?,
            heal_range: group_number(fields, Self::KIND, "heal_range")?,
        })
    }

    fn write(&self, fields: &mut FieldSet) {
        fields.insert("heal_amount", self.heal_amount.clone());
        fields.insert("heal_rate", self.heal_rate.clone());
        fields.insert("heal_range", self.heal_range.clone());
    }
}

impl FlatGroup for BarrierCapability {
    const KIND: CapabilityKind = CapabilityKind::Barrier;

    fn read(fields: &FieldSet) -> Result<Self, ValidationError> {
        Ok(Self {
            health: group_number(fields, Self::KIND, "barrier_health")?,
            cooldown: group_number(fields, Self::KIND, "barrier_cooldown")?,
            regen: group_number(fields, Self::KIND, "barrier_regen")?,
            regen_cooldown: group_number(fields, Self::KIND, "barrier_regen_cooldown")?,
            radius: group_number(fields, Self::KIND, "barrier_radius")?,
        })
    }

    fn write(&self, fields: &mut FieldSet) {
        fields.insert("barrier_health", self.health.clone());
        fields.insert("barrier_cooldown", self.cooldown.clone());
        fields.insert("barrier_regen", self.regen.clone());
        fields.insert("barrier_regen_cooldown", self.regen_cooldown.clone());
        fields.insert("barrier_radius", self.radius.clone());
    }
}

impl FlatGroup for CloakCapability {
    const KIND: CapabilityKind = CapabilityKind::Cloak;

    fn read(fields: &FieldSet) -> Result<Self, ValidationError> {
        let duration = group_number(fields, Self::KIND, "cloak_duration")?;
        let radius = group_number(fields, Self::KIND, "cloak_radius")?;
        let cooldown = group_number(fields, Self::KIND, "cloak_cooldown")?;

        if !fields.any_present(&["timer_based", "proximity_based"]) {
            return Err(ValidationError::missing(Self::KIND.incomplete_message()));
        }
        let timer_based = trigger(fields, "timer_based")?;
        let proximity_based = trigger(fields, "proximity_based")?;
        if !timer_based && !proximity_based {
            return Err(ValidationError::inactive_cloak(
                "At least one of timer_based or proximity_based must be true",
            ));
        }

        Ok(Self {
            duration,
            radius,
            cooldown,
            timer_based,
            proximity_based,
        })
    }

    fn write(&self, fields: &mut FieldSet) {
        fields.insert("cloak_duration", self.duration.clone());
        fields.insert("cloak_radius", self.radius.clone());
        fields.insert("cloak_cooldown", self.cooldown.clone());
        fields.insert("timer_based", self.timer_based);
        fields.insert("proximity_based", self.proximity_based);
    }
}

impl FlatGroup for SpawnerCapability {
    const KIND: CapabilityKind = CapabilityKind::Spawner;

    fn read(fields: &FieldSet) -> Result<Self, ValidationError> {
        Ok(Self {
            spawn_rate: group_number(fields, Self::KIND, "spawn_rate")?,
        })
    }

    fn write(&self, fields: &mut FieldSet) {
        fields.insert("spawn_rate", self.spawn_rate.clone());
    }
}

fn core_number(fields: &FieldSet, name: &str) -> Result<Number, ValidationError> {
    if !fields.is_filled(name) {
        return Err(ValidationError::missing("Missing required fields"));
    }
    fields
        .raw_number(name)
        .cloned()
        .ok_or_else(|| ValidationError::wrong_type(format!("{} must be a number", name)))
}

fn core_text(fields: &FieldSet, name: &str) -> Result<String, ValidationError> {
    if !fields.is_filled(name) {
        return Err(ValidationError::missing("Missing required fields"));
    }
    fields
        .text(name)
        .map(str::to_string)
        .ok_or_else(|| ValidationError::wrong_type(format!("{} must be a valid string", name)))
}

fn group_number(
    fields: &FieldSet,
    kind: CapabilityKind,
    name: &str,
) -> Result<Number, ValidationError> {
    if !fields.is_filled(name) {
        return Err(ValidationError::missing(kind.incomplete_message()));
    }
    fields
        .raw_number(name)
        .cloned()
        .ok_or_else(|| ValidationError::wrong_type(format!("{} must be a number", name)))
}

fn group_text(
    fields: &FieldSet,
    kind: CapabilityKind,
    name: &str,
) -> Result<String, ValidationError> {
    if !fields.is_filled(name) {
        return Err(ValidationError::missing(kind.incomplete_message()));
    }
    fields
        .text(name)
        .map(str::to_string)
        .ok_or_else(|| ValidationError::wrong_type(format!("{} must be a valid string", name)))
}

fn optional_text(fields: &FieldSet, name: &str) -> Result<Option<String>, ValidationError> {
    match fields.get(name) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ValidationError::wrong_type(format!(
            "{} must be a valid string",
            name
        ))),
    }
}

fn trigger(fields: &FieldSet, name: &str) -> Result<bool, ValidationError> {
    match fields.get(name) {
        None => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(ValidationError::wrong_type(
            "timer_based and proximity_based must be boolean values when provided",
        )),
    }
}

fn opt_value(value: Option<&str>) -> Value {
    value.map_or(Value::Null, |s| Value::String(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorCode;
    use serde_json::json;

    fn goblin() -> FieldSet {
        FieldSet::from_value(json!({
            "type": "melee",
            "name": "Goblin",
            "health": 100,
            "speed": 5,
            "damage": 10,
            "score": 50,
            "attack_speed": 2,
            "sprite": "goblin.png"
        }))
        .unwrap()
    }

    fn assemble(fields: &FieldSet) -> Result<EnemyRecord, ValidationError> {
        let now = Utc::now();
        EnemyRecord::assemble(7, fields, now, now)
    }

    #[test]
    fn test_core_only_record_has_no_capabilities() {
        let record = assemble(&goblin()).unwrap();
        assert_eq!(record.core.name, "Goblin");
        assert_eq!(record.kind.as_deref(), Some("melee"));
        assert!(record.capabilities.kinds().is_empty());
    }

    #[test]
    fn test_flat_form_nulls_absent_groups() {
        let record = assemble(&goblin()).unwrap();
        let flat = record.to_fields();
        for kind in CapabilityKind::ALL {
            for name in kind.field_names() {
                assert!(flat.iter().any(|(k, _)| k == name), "{} missing", name);
                assert!(!flat.is_present(name));
            }
        }
        assert_eq!(flat.number("id"), Some(7.0));
    }

    #[test]
    fn test_partial_group_cannot_be_assembled() {
        let mut fields = goblin();
        fields.insert("heal_amount", 10);
        fields.insert("heal_rate", 100);
        let err = assemble(&fields).unwrap_err();
        assert_eq!(err.code(), ErrorCode::MissingRequiredField);
        assert_eq!(err.message(), CapabilityKind::Healer.incomplete_message());
    }

    #[test]
    fn test_cloak_requires_an_active_trigger() {
        let mut fields = goblin();
        fields.insert("cloak_duration", 5);
        fields.insert("cloak_radius", 100);
        fields.insert("cloak_cooldown", 10);
        fields.insert("timer_based", false);
        fields.insert("proximity_based", false);
        let err = assemble(&fields).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InactiveCloak);

        fields.insert("proximity_based", true);
        let record = assemble(&fields).unwrap();
        let cloak = record.capabilities.cloak.unwrap();
        assert!(!cloak.timer_based);
        assert!(cloak.proximity_based);
    }

    #[test]
    fn test_missing_trigger_defaults_to_off() {
        let mut fields = goblin();
        fields.insert("cloak_duration", 5);
        fields.insert("cloak_radius", 100);
        fields.insert("cloak_cooldown", 10);
        fields.insert("timer_based", true);
        let record = assemble(&fields).unwrap();
        assert_eq!(
            record.capabilities.get(CapabilityKind::Cloak),
            Some(Capability::Cloak(CloakCapability {
                duration: Number::from(5),
                radius: Number::from(100),
                cooldown: Number::from(10),
                timer_based: true,
                proximity_based: false,
            }))
        );
    }

    #[test]
    fn test_merge_keeps_untouched_groups() {
        let mut fields = goblin();
        fields.insert("spawn_rate", 3);
        let record = assemble(&fields).unwrap();

        let patch = FieldSet::from_value(json!({"health": 40, "spawn_rate": null, "id": 99})).unwrap();
        let updated = record.merged_with(&patch, Utc::now()).unwrap();
        assert_eq!(updated.id, 7);
        assert_eq!(updated.core.health, Number::from(40));
        assert_eq!(updated.capabilities.spawner, Some(SpawnerCapability { spawn_rate: Number::from(3) }));
        assert_eq!(updated.created_at, record.created_at);
    }

    #[test]
    fn test_flat_form_returns_supplied_values() {
        let mut fields = goblin();
        for (name, value) in [
            ("projectile_sprite", json!("arrow.png")),
            ("projectile_sound", json!("twang.wav")),
            ("projectile_speed", json!(6)),
            ("range", json!(400)),
            ("fire_rate", json!(1.5)),
            ("spawn_rate", json!(2)),
        ] {
            fields.insert(name, value);
        }
        let flat = assemble(&fields).unwrap().to_fields();
        for (name, value) in fields.iter() {
            assert_eq!(flat.get(name), Some(value), "{} changed", name);
        }
        assert_eq!(flat.get("health"), Some(&json!(100)));
        assert_ne!(flat.get("health"), Some(&json!(100.0)));
    }

    #[test]
    fn test_falsy_group_is_left_out() {
        let mut fields = goblin();
        fields.insert("timer_based", false);
        fields.insert("proximity_based", false);
        fields.insert("spawn_rate", 0);
        let record = assemble(&fields).unwrap();
        assert!(record.capabilities.kinds().is_empty());
    }

    #[test]
    fn test_capabilities_iterate_in_canonical_order() {
        let mut caps = Capabilities::default();
        caps.insert(Capability::Spawner(SpawnerCapability {
            spawn_rate: Number::from(1),
        }));
        caps.insert(Capability::Healer(HealerCapability {
            heal_amount: Number::from(1),
            heal_rate: Number::from(1),
            heal_range: Number::from(1),
        }));
        assert_eq!(
            caps.kinds(),
            vec![CapabilityKind::Healer, CapabilityKind::Spawner]
        );
    }
}
