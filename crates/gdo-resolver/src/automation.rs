//! Action lists of scripts and cover warning triggers
//!
//! Steps are single-key mappings named after their action. `secplus_gdo.*`
//! steps are bound to their root; steps of other domains belong to the host
//! and are kept as written, except that their `then`/`else` branches are
//! walked so nested `secplus_gdo.*` steps are bound as well.

use crate::action::{bind_action, BoundAction, Command};
use crate::error::{ResolveError, ResolveResult};
use crate::pass::ResolutionPass;
use crate::schema::{describe, field_path, ClosedSet, Fields, CONF_ID};
use gdo_config::Declaration;
use gdo_core::ComponentId;
use indexmap::IndexMap;
use serde::Serialize;
use serde_yaml::Value;

const CONF_THEN: &str = "then";
const CONF_ELSE: &str = "else";
const BRANCH_KEYS: &[&str] = &[CONF_THEN, CONF_ELSE];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionStep {
    Gdo(BoundAction),
    Host {
        action: String,
        config: Value,
        #[serde(skip_serializing_if = "IndexMap::is_empty")]
        branches: IndexMap<String, Automation>,
    },
}

impl ActionStep {
    fn parse(item: &Value, path: &str, pass: &ResolutionPass) -> ResolveResult<Self> {
        let (name, value) = match item.as_mapping() {
            Some(map) if map.len() == 1 => map
                .iter()
                .next()
                .and_then(|(k, v)| k.as_str().map(|k| (k, v)))
                .ok_or_else(|| ResolveError::schema(path, "action names must be strings"))?,
            _ => {
                return Err(ResolveError::schema(
                    path,
                    format!(
                        "an action must be a mapping with exactly one key, found {}",
                        describe(item)
                    ),
                ))
            }
        };
        let step_path = field_path(path, name);

        match Command::from_action_name(name) {
            Some(Ok(command)) => {
                let target = action_target(value, &step_path)?;
                Ok(ActionStep::Gdo(bind_action(pass, command, &target)?))
            }
            Some(Err(unknown)) => Err(ResolveError::unknown_option(
                step_path,
                unknown,
                &Command::legal_values(),
            )),
            None => {
                let mut config = value.clone();
                let mut branches = IndexMap::new();
                if let Value::Mapping(map) = &mut config {
                    for key in BRANCH_KEYS {
                        if let Some(branch) = map.remove(*key) {
                            let branch_path = field_path(&step_path, key);
                            branches.insert(
                                key.to_string(),
                                Automation::parse(&branch, &branch_path, pass)?,
                            );
                        }
                    }
                }
                Ok(ActionStep::Host {
                    action: name.to_string(),
                    config,
                    branches,
                })
            }
        }
    }

    /// Bound secplus_gdo actions of this step, including nested branches
    fn collect_bound<'a>(&'a self, out: &mut Vec<&'a BoundAction>) {
        match self {
            ActionStep::Gdo(action) => out.push(action),
            ActionStep::Host { branches, .. } => {
                for automation in branches.values() {
                    for step in &automation.steps {
                        step.collect_bound(out);
                    }
                }
            }
        }
    }
}

/// `secplus_gdo.<command>: <id>` or `secplus_gdo.<command>: {id: <id>}`
fn action_target(value: &Value, path: &str) -> ResolveResult<ComponentId> {
    let id = match value {
        Value::Mapping(map) => {
            let fields = Fields::new(map, path);
            fields.check_keys(&[&[CONF_ID]])?;
            fields.id(CONF_ID)?.ok_or_else(|| fields.required(CONF_ID))?
        }
        Value::Null => {
            return Err(ResolveError::schema(
                field_path(path, CONF_ID),
                "required key not provided",
            ))
        }
        Value::String(s) => {
            ComponentId::new(s.as_str()).map_err(|e| ResolveError::schema(path, e.to_string()))?
        }
        other => {
            return Err(ResolveError::schema(
                path,
                format!("expected an id, found {}", describe(other)),
            ))
        }
    };
    Ok(id)
}

/// An ordered list of action steps
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Automation {
    pub steps: Vec<ActionStep>,
}

impl Automation {
    /// Parse a list of steps, a `{then: [...]}` mapping or a single step
    pub fn parse(value: &Value, path: &str, pass: &ResolutionPass) -> ResolveResult<Self> {
        let steps = match value {
            Value::Null => Vec::new(),
            Value::Sequence(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| ActionStep::parse(item, &format!("{}[{}]", path, i), pass))
                .collect::<ResolveResult<Vec<_>>>()?,
            Value::Mapping(map) if map.contains_key(CONF_THEN) => {
                let then_path = field_path(path, CONF_THEN);
                return Self::parse(map.get(CONF_THEN).unwrap_or(&Value::Null), &then_path, pass);
            }
            Value::Mapping(_) => vec![ActionStep::parse(value, path, pass)?],
            other => {
                return Err(ResolveError::schema(
                    path,
                    format!("expected a list of actions, found {}", describe(other)),
                ))
            }
        };
        Ok(Self { steps })
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Every bound secplus_gdo action, depth first
    pub fn bound_actions(&self) -> Vec<&BoundAction> {
        let mut out = Vec::new();
        for step in &self.steps {
            step.collect_bound(&mut out);
        }
        out
    }
}

/// A host script whose steps were bound
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Script {
    pub id: ComponentId,
    pub then: Automation,
}

impl Script {
    /// Bind a `script:` item; keys other than `id` and `then` belong to the host
    pub fn bind(declaration: &Declaration, pass: &ResolutionPass) -> ResolveResult<Self> {
        let fields = Fields::new(&declaration.config, &declaration.path);
        let id = fields.id(CONF_ID)?.ok_or_else(|| fields.required(CONF_ID))?;
        let then = match fields.raw(CONF_THEN) {
            Some(value) => Automation::parse(value, &fields.key_path(CONF_THEN), pass)?,
            None => Automation::default(),
        };
        Ok(Self { id, then })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::tests::RecordingDriver;
    use crate::factory::tests::pass_with_roots;

    fn parse(yaml: &str) -> ResolveResult<Automation> {
        let pass = pass_with_roots(&["gdo"]);
        Automation::parse(&serde_yaml::from_str(yaml).unwrap(), "script[0].then", &pass)
    }

    #[test]
    fn test_both_target_forms() {
        let automation = parse(
            r#"
- secplus_gdo.door_close: gdo
- secplus_gdo.light_toggle:
    id: gdo
"#,
        )
        .unwrap();

        let bound = automation.bound_actions();
        assert_eq!(bound.len(), 2);
        assert_eq!(bound[0].command, Command::DoorClose);
        assert_eq!(bound[1].command, Command::LightToggle);
        assert_eq!(bound[1].target.as_str(), "gdo");
    }

    #[test]
    fn test_host_steps_and_nested_branches() {
        let automation = parse(
            r#"
- logger.log: Closing
- if:
    condition:
      binary_sensor.is_on: garage_motion
    then:
      - secplus_gdo.door_stop: gdo
    else:
      - delay: 5s
      - secplus_gdo.door_close: gdo
"#,
        )
        .unwrap();

        assert_eq!(automation.steps.len(), 2);
        match &automation.steps[1] {
            ActionStep::Host {
                action,
                config,
                branches,
            } => {
                assert_eq!(action, "if");
                assert!(config.get("condition").is_some());
                assert!(config.get("then").is_none());
                assert_eq!(branches.len(), 2);
            }
            other => panic!("unexpected step: {other:?}"),
        }

        let commands: Vec<_> = automation
            .bound_actions()
            .iter()
            .map(|action| action.command)
            .collect();
        assert_eq!(commands, vec![Command::DoorStop, Command::DoorClose]);
    }

    #[test]
    fn test_then_mapping_and_single_step() {
        let automation = parse("then:\n  - secplus_gdo.sync: gdo\n").unwrap();
        assert_eq!(automation.steps.len(), 1);

        let automation = parse("secplus_gdo.resync: gdo\n").unwrap();
        assert_eq!(automation.bound_actions()[0].command, Command::Resync);
    }

    #[test]
    fn test_invalid_actions() {
        let err = parse("- secplus_gdo.door_slam: gdo\n").unwrap_err();
        assert!(matches!(
            err,
            ResolveError::SchemaValidation { ref path, ref reason }
                if path == "script[0].then[0].secplus_gdo.door_slam"
                    && reason.contains("'lock_toggle'")
        ));

        let err = parse("- secplus_gdo.door_open:\n").unwrap_err();
        assert!(matches!(
            err,
            ResolveError::SchemaValidation { path, .. }
                if path == "script[0].then[0].secplus_gdo.door_open.id"
        ));

        let err = parse("- secplus_gdo.door_open: other\n").unwrap_err();
        assert!(matches!(
            err,
            ResolveError::UnknownReference { id, .. } if id == "other"
        ));

        assert!(parse("- a: 1\n  b: 2\n").is_err());
        assert!(parse("42\n").is_err());
    }

    #[test]
    fn test_play_bound_actions() {
        let automation = parse("- secplus_gdo.door_open: gdo\n- secplus_gdo.lock_toggle: gdo\n")
            .unwrap();
        let mut driver = RecordingDriver::default();
        for action in automation.bound_actions() {
            action.play(&mut driver).unwrap();
        }
        assert_eq!(driver.calls, vec!["door_open", "lock_toggle"]);
    }

    #[test]
    fn test_script_requires_id() {
        let pass = pass_with_roots(&["gdo"]);
        let declaration = Declaration {
            path: "script[0]".to_string(),
            config: serde_yaml::from_str("mode: queued\nthen:\n  - secplus_gdo.sync: gdo\n")
                .unwrap(),
        };
        let err = Script::bind(&declaration, &pass).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::SchemaValidation { path, .. } if path == "script[0].id"
        ));
    }
}
