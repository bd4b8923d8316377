//! Inventory of users, computers and groups
//!
//! ```toml
//! [computers.web1]
//! host_name = "web1.example.com"
//! ip = "10.0.0.5"
//!
//! [users.deploy]
//! home_dir = "~deploy"
//!
//! [groups.webservers]
//! computers = ["web1", "web2"]
//! ```
//!
//! Records are free-form; they become the `computer` value templates see.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{PantryError, PantryResult};

use super::loader::{expand_tilde, parse_with_warnings};
use super::ConfigWarning;

const INVENTORY_KEYS: &[&str] = &["users", "computers", "groups"];

/// Named set of computers
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Group {
    #[serde(default)]
    pub computers: Vec<String>,
    /// Any other keys of the group table
    #[serde(flatten)]
    pub vars: Map<String, Value>,
}

/// Parsed inventory file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Inventory {
    pub users: BTreeMap<String, Value>,
    pub computers: BTreeMap<String, Value>,
    pub groups: BTreeMap<String, Group>,
}

impl Inventory {
    /// Load an inventory file, normalizing records and expanding `~`
    pub fn load(path: &Path) -> PantryResult<(Self, Vec<ConfigWarning>)> {
        let content = fs::read_to_string(path).map_err(|e| PantryError::Inventory {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let (inventory, warnings): (Self, _) = parse_with_warnings(path, &content, INVENTORY_KEYS)
            .map_err(|message| PantryError::Inventory {
                file: path.to_path_buf(),
                message,
            })?;
        Ok((inventory.normalized(), warnings))
    }

    /// Record of one computer
    pub fn computer(&self, name: &str) -> Option<&Value> {
        self.computers.get(name)
    }

    /// Record of one user
    pub fn user(&self, name: &str) -> Option<&Value> {
        self.users.get(name)
    }

    /// Computer names listed in a group, or `None` for an unknown group
    pub fn computers_in_group(&self, group: &str) -> Option<&[String]> {
        self.groups.get(group).map(|g| g.computers.as_slice())
    }

    /// Every record gets a `name` equal to its table key unless it has one,
    /// and `~` is expanded in string values under keys naming a dir or path.
    pub fn normalized(mut self) -> Self {
        for records in [&mut self.users, &mut self.computers] {
            for (name, record) in records.iter_mut() {
                if let Value::Object(fields) = record {
                    fields
                        .entry("name")
                        .or_insert_with(|| Value::String(name.clone()));
                }
                expand_path_values(record);
            }
        }
        self
    }
}

fn is_path_key(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    key.contains("dir") || key.contains("path")
}

fn expand_path_values(value: &mut Value) {
    match value {
        Value::Object(fields) => {
            for (key, field) in fields.iter_mut() {
                match field {
                    Value::String(s) if is_path_key(key) => {
                        *s = expand_tilde(Path::new(s.as_str()))
                            .to_string_lossy()
                            .into_owned();
                    }
                    other => expand_path_values(other),
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(expand_path_values),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SAMPLE: &str = r#"
[computers.web1]
host_name = "web1.example.com"
ip = "10.0.0.5"
backup_dir = "~/backups"
aliases = ["www"]

[users.deploy]
name = "Deploy Bot"
key_path = "~/.ssh/deploy.pub"
shell = "~/not-a-path"

[groups.webservers]
computers = ["web1"]
role = "frontend"
"#;

    fn sample() -> Inventory {
        toml::from_str::<Inventory>(SAMPLE).unwrap().normalized()
    }

    #[test]
    fn computer_lookup() {
        let inventory = sample();
        let web1 = inventory.computer("web1").unwrap();
        assert_eq!(web1["ip"], "10.0.0.5");
        assert_eq!(web1["aliases"], json!(["www"]));
        assert!(inventory.computer("db1").is_none());
    }

    #[test]
    fn records_get_their_table_name() {
        let inventory = sample();
        assert_eq!(inventory.computer("web1").unwrap()["name"], "web1");
        // an explicit name wins
        assert_eq!(inventory.user("deploy").unwrap()["name"], "Deploy Bot");
    }

    #[test]
    fn tilde_expanded_only_for_path_keys() {
        let home = dirs::home_dir().unwrap();
        let inventory = sample();
        assert_eq!(
            inventory.computer("web1").unwrap()["backup_dir"],
            home.join("backups").to_string_lossy().into_owned()
        );
        let deploy = inventory.user("deploy").unwrap();
        assert_eq!(
            deploy["key_path"],
            home.join(".ssh/deploy.pub").to_string_lossy().into_owned()
        );
        assert_eq!(deploy["shell"], "~/not-a-path");
    }

    #[test]
    fn groups_list_computers() {
        let inventory = sample();
        assert_eq!(
            inventory.computers_in_group("webservers"),
            Some(&["web1".to_string()][..])
        );
        assert_eq!(inventory.groups["webservers"].vars["role"], "frontend");
        assert!(inventory.computers_in_group("nope").is_none());
    }

    #[test]
    fn empty_inventory_is_valid() {
        let inventory: Inventory = toml::from_str("").unwrap();
        assert!(inventory.computers.is_empty());
    }
}
