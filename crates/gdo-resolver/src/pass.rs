//! The resolution pass over one configuration document
//!
//! Roots are bound first, then entities, then scripts. The pass is the only
//! place that mutates a root: [`ResolutionPass::register`] claims the
//! entity's id, attaches it and records the registration call. The first
//! failure aborts the whole document.

use crate::automation::Script;
use crate::component::{GdoComponent, RegistrationRecord};
use crate::error::{ResolveError, ResolveResult};
use crate::factory::build;
use crate::kind::{Entity, EntityKind, Registration};
use crate::kinds::{
    BinarySensorType, ButtonType, CoverType, LightType, LockType, NumberType, SelectType,
    SensorType, SwitchType, TextSensorType,
};
use crate::root;
use crate::schema::{Fields, CONF_ID};
use gdo_config::{ConfigDocument, Declaration, EntityDeclaration};
use serde_yaml::{Mapping, Value};
use gdo_core::{ComponentId, Platform, CONF_SECPLUS_GDO_ID, DOMAIN};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// State of one resolution pass
#[derive(Debug, Default)]
pub struct ResolutionPass {
    roots: IndexMap<ComponentId, GdoComponent>,
    /// Every id claimed so far, with the path that claimed it
    ids: HashMap<ComponentId, String>,
    /// Ids written explicitly anywhere in the document; never generated
    reserved: HashSet<ComponentId>,
    scripts: Vec<Script>,
}

/// The outcome of a successful pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub roots: IndexMap<ComponentId, GdoComponent>,
    pub scripts: Vec<Script>,
}

impl Resolution {
    pub fn root(&self, id: &str) -> Option<&GdoComponent> {
        self.roots.values().find(|root| root.id.as_str() == id)
    }

    /// Total number of entities over all roots
    pub fn entity_count(&self) -> usize {
        self.roots.values().map(GdoComponent::entity_count).sum()
    }
}

impl ResolutionPass {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_root(&self, id: &ComponentId) -> bool {
        self.roots.contains_key(id)
    }

    pub fn root(&self, id: &ComponentId) -> Option<&GdoComponent> {
        self.roots.get(id)
    }

    /// Reserve the explicit ids of a document before anything is resolved
    pub fn reserve_ids(&mut self, document: &ConfigDocument) {
        let explicit = |config: &Mapping| {
            config
                .get(CONF_ID)
                .and_then(Value::as_str)
                .and_then(|id| ComponentId::new(id).ok())
        };
        let configs = document
            .roots
            .iter()
            .chain(&document.scripts)
            .map(|declaration| &declaration.config)
            .chain(document.entities.iter().map(|entity| &entity.config));
        self.reserved.extend(configs.filter_map(explicit));
    }

    fn is_taken(&self, id: &ComponentId) -> bool {
        self.ids.contains_key(id) || self.reserved.contains(id)
    }

    /// Id for a declaration that has none
    ///
    /// Deterministic per document; ids reserved or already claimed are
    /// skipped by appending a counter.
    pub fn generated_id(&self, parts: &[&str], index: usize) -> ComponentId {
        let base = ComponentId::generated(parts, index);
        if !self.is_taken(&base) {
            return base;
        }
        (2..)
            .map(|n| ComponentId::generated(&[base.as_str()], n))
            .find(|id| !self.is_taken(id))
            .unwrap_or(base)
    }

    fn claim_id(&mut self, id: &ComponentId, path: &str) -> ResolveResult<()> {
        if let Some(first) = self.ids.get(id) {
            return Err(ResolveError::conflict(
                first.as_str(),
                path,
                format!("id '{}' is declared twice", id),
            ));
        }
        self.ids.insert(id.clone(), path.to_string());
        Ok(())
    }

    /// Bind a root declaration; `index` numbers roots without an explicit id
    pub fn bind_root(&mut self, declaration: &Declaration, index: usize) -> ResolveResult<()> {
        let fallback = self.generated_id(&[DOMAIN], index);
        let root = root::bind_root(declaration, fallback)?;
        self.claim_id(&root.id, &declaration.path)?;
        self.roots.insert(root.id.clone(), root);
        Ok(())
    }

    /// The root an entity declaration attaches to
    ///
    /// `secplus_gdo_id` may be omitted when exactly one root exists.
    pub fn resolve_parent(&self, fields: &Fields<'_>) -> ResolveResult<ComponentId> {
        if let Some(id) = fields.id(CONF_SECPLUS_GDO_ID)? {
            if !self.roots.contains_key(&id) {
                return Err(ResolveError::unknown_root(id.as_str()));
            }
            return Ok(id);
        }

        let mut ids = self.roots.keys();
        match (ids.next(), ids.next()) {
            (None, _) => Err(ResolveError::unknown_root(DOMAIN)),
            (Some(id), None) => Ok(id.clone()),
            (Some(_), Some(_)) => Err(ResolveError::schema(
                fields.key_path(CONF_SECPLUS_GDO_ID),
                format!("required when more than one {} root is declared", DOMAIN),
            )),
        }
    }

    /// Attach an entity to its root; the single mutation point for roots
    pub fn register<K: EntityKind>(
        &mut self,
        entity: Entity<K>,
        registration: Registration<K>,
        path: &str,
    ) -> ResolveResult<()> {
        self.claim_id(&entity.id, path)?;

        let record = RegistrationRecord {
            method: registration.method,
            platform: K::PLATFORM,
            entity: entity.id.clone(),
        };
        let root = self
            .roots
            .get_mut(&entity.parent)
            .ok_or_else(|| ResolveError::unknown_root(entity.parent.as_str()))?;

        debug!(
            "Registering {} {} '{}' via {}.{}",
            K::PLATFORM,
            entity.kind.as_str(),
            record.entity,
            root.id,
            record.method
        );
        (registration.attach)(root, entity)?;
        root.record(record);
        Ok(())
    }

    fn resolve<K: EntityKind>(&mut self, declaration: &EntityDeclaration) -> ResolveResult<()> {
        let (entity, registration) = build::<K>(self, declaration)?;
        self.register(entity, registration, &declaration.path)
    }

    /// Build and register one entity declaration
    pub fn resolve_entity(&mut self, declaration: &EntityDeclaration) -> ResolveResult<()> {
        match declaration.platform {
            Platform::BinarySensor => self.resolve::<BinarySensorType>(declaration),
            Platform::Button => self.resolve::<ButtonType>(declaration),
            Platform::Cover => self.resolve::<CoverType>(declaration),
            Platform::Light => self.resolve::<LightType>(declaration),
            Platform::Lock => self.resolve::<LockType>(declaration),
            Platform::Number => self.resolve::<NumberType>(declaration),
            Platform::Select => self.resolve::<SelectType>(declaration),
            Platform::Sensor => self.resolve::<SensorType>(declaration),
            Platform::Switch => self.resolve::<SwitchType>(declaration),
            Platform::TextSensor => self.resolve::<TextSensorType>(declaration),
        }
    }

    /// Bind the `secplus_gdo.*` steps of a script
    pub fn bind_script(&mut self, declaration: &Declaration) -> ResolveResult<()> {
        let script = Script::bind(declaration, self)?;
        self.claim_id(&script.id, &declaration.path)?;
        debug!(
            "Bound script '{}' with {} secplus_gdo action(s)",
            script.id,
            script.then.bound_actions().len()
        );
        self.scripts.push(script);
        Ok(())
    }

    pub fn finish(self) -> Resolution {
        Resolution {
            roots: self.roots,
            scripts: self.scripts,
        }
    }
}

/// Resolve a whole document: roots, then entities, then scripts
pub fn resolve_document(document: &ConfigDocument) -> ResolveResult<Resolution> {
    let mut pass = ResolutionPass::new();
    pass.reserve_ids(document);

    for (index, root) in document.roots.iter().enumerate() {
        pass.bind_root(root, index)?;
    }
    for entity in &document.entities {
        pass.resolve_entity(entity)?;
    }
    for script in &document.scripts {
        pass.bind_script(script)?;
    }

    let resolution = pass.finish();
    info!(
        "Resolved {} root(s) with {} entities and {} script(s)",
        resolution.roots.len(),
        resolution.entity_count(),
        resolution.scripts.len()
    );
    Ok(resolution)
}
