use serde::{Deserialize, Serialize};

/// One machine record as reported by the MAAS machines endpoint.
///
/// `system_id` is the stable identity MAAS assigns at enlistment and never
/// changes; `status_name` is the human-readable status and the only field
/// that moves between polls. The status vocabulary is open-ended upstream,
/// so it stays a plain string here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Machine {
    pub system_id: String,
    pub status_name: String,
}

impl Machine {
    pub fn new(system_id: impl Into<String>, status_name: impl Into<String>) -> Self {
        Self {
            system_id: system_id.into(),
            status_name: status_name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_maas_field_names() {
        let machine: Machine =
            serde_json::from_str(r#"{"system_id":"rfykrh","status_name":"Broken"}"#).unwrap();
        assert_eq!(machine, Machine::new("rfykrh", "Broken"));
    }

    #[test]
    fn ignores_extra_fields() {
        // Real MAAS responses carry dozens of fields per machine.
        let machine: Machine = serde_json::from_str(
            r#"{"system_id":"a3babp","hostname":"node-02","status_name":"Deployed","status":6}"#,
        )
        .unwrap();
        assert_eq!(machine, Machine::new("a3babp", "Deployed"));
    }

    #[test]
    fn serializes_maas_field_names() {
        let json = serde_json::to_string(&Machine::new("tekmyk", "Ready")).unwrap();
        assert_eq!(json, r#"{"system_id":"tekmyk","status_name":"Ready"}"#);
    }
}
