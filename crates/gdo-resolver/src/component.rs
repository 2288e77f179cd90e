//! The resolved secplus_gdo root and the entities attached to it
//!
//! The root owns every entity registered against it. Entities refer back to
//! their root only by id, so there is a single ownership edge.

use crate::error::{ResolveError, ResolveResult};
use crate::kind::{Entity, EntityKind};
use crate::kinds::{
    BinarySensor, Button, Cover, Light, Lock, Number, NumberType, Select, Sensor, Switch,
    SwitchType, TextSensor,
};
use crate::root::DriverSettings;
use gdo_core::{ComponentId, Platform};
use indexmap::IndexMap;
use serde::Serialize;

/// One registration call made against a root, in call order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationRecord {
    pub method: &'static str,
    pub platform: Platform,
    pub entity: ComponentId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GdoComponent {
    pub id: ComponentId,
    pub settings: DriverSettings,
    binary_sensors: Vec<BinarySensor>,
    sensors: Vec<Sensor>,
    text_sensors: Vec<TextSensor>,
    buttons: Vec<Button>,
    numbers: IndexMap<NumberType, Number>,
    switches: IndexMap<SwitchType, Switch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    door: Option<Cover>,
    #[serde(skip_serializing_if = "Option::is_none")]
    light: Option<Light>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lock: Option<Lock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    protocol_select: Option<Select>,
    registrations: Vec<RegistrationRecord>,
}

/// Store an entity in a slot that holds at most one
fn occupy<K: EntityKind>(slot: &mut Option<Entity<K>>, entity: Entity<K>) -> ResolveResult<()> {
    if let Some(existing) = slot {
        return Err(slot_taken(&existing.id, &entity));
    }
    *slot = Some(entity);
    Ok(())
}

fn occupy_keyed<K: EntityKind>(
    slots: &mut IndexMap<K, Entity<K>>,
    entity: Entity<K>,
) -> ResolveResult<()> {
    if let Some(existing) = slots.get(&entity.kind) {
        return Err(slot_taken(&existing.id, &entity));
    }
    slots.insert(entity.kind, entity);
    Ok(())
}

fn slot_taken<K: EntityKind>(existing: &ComponentId, entity: &Entity<K>) -> ResolveError {
    ResolveError::conflict(
        existing.as_str(),
        entity.id.as_str(),
        format!(
            "root '{}' already has a {} {}",
            entity.parent,
            K::PLATFORM,
            entity.kind.as_str()
        ),
    )
}

impl GdoComponent {
    pub fn new(id: ComponentId, settings: DriverSettings) -> Self {
        Self {
            id,
            settings,
            binary_sensors: Vec::new(),
            sensors: Vec::new(),
            text_sensors: Vec::new(),
            buttons: Vec::new(),
            numbers: IndexMap::new(),
            switches: IndexMap::new(),
            door: None,
            light: None,
            lock: None,
            protocol_select: None,
            registrations: Vec::new(),
        }
    }

    // Attach targets, one per storage shape

    pub fn add_binary_sensor(&mut self, entity: BinarySensor) -> ResolveResult<()> {
        self.binary_sensors.push(entity);
        Ok(())
    }

    pub fn add_sensor(&mut self, entity: Sensor) -> ResolveResult<()> {
        self.sensors.push(entity);
        Ok(())
    }

    pub fn add_text_sensor(&mut self, entity: TextSensor) -> ResolveResult<()> {
        self.text_sensors.push(entity);
        Ok(())
    }

    pub fn add_button(&mut self, entity: Button) -> ResolveResult<()> {
        self.buttons.push(entity);
        Ok(())
    }

    pub fn set_number(&mut self, entity: Number) -> ResolveResult<()> {
        occupy_keyed(&mut self.numbers, entity)
    }

    pub fn set_switch(&mut self, entity: Switch) -> ResolveResult<()> {
        occupy_keyed(&mut self.switches, entity)
    }

    pub fn set_door(&mut self, entity: Cover) -> ResolveResult<()> {
        occupy(&mut self.door, entity)
    }

    pub fn set_light(&mut self, entity: Light) -> ResolveResult<()> {
        occupy(&mut self.light, entity)
    }

    pub fn set_lock(&mut self, entity: Lock) -> ResolveResult<()> {
        occupy(&mut self.lock, entity)
    }

    pub fn set_protocol_select(&mut self, entity: Select) -> ResolveResult<()> {
        occupy(&mut self.protocol_select, entity)
    }

    pub(crate) fn record(&mut self, record: RegistrationRecord) {
        self.registrations.push(record);
    }

    // Accessors

    pub fn binary_sensors(&self) -> &[BinarySensor] {
        &self.binary_sensors
    }

    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    pub fn text_sensors(&self) -> &[TextSensor] {
        &self.text_sensors
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn number(&self, kind: NumberType) -> Option<&Number> {
        self.numbers.get(&kind)
    }

    pub fn numbers(&self) -> impl Iterator<Item = &Number> {
        self.numbers.values()
    }

    pub fn switch(&self, kind: SwitchType) -> Option<&Switch> {
        self.switches.get(&kind)
    }

    pub fn switches(&self) -> impl Iterator<Item = &Switch> {
        self.switches.values()
    }

    pub fn door(&self) -> Option<&Cover> {
        self.door.as_ref()
    }

    pub fn light(&self) -> Option<&Light> {
        self.light.as_ref()
    }

    pub fn lock(&self) -> Option<&Lock> {
        self.lock.as_ref()
    }

    pub fn protocol_select(&self) -> Option<&Select> {
        self.protocol_select.as_ref()
    }

    /// Registration calls in the order they were made
    pub fn registrations(&self) -> &[RegistrationRecord] {
        &self.registrations
    }

    /// Number of entities attached to this root
    pub fn entity_count(&self) -> usize {
        self.registrations.len()
    }
}
