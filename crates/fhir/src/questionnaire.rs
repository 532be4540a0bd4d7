//! FHIR-aligned `Questionnaire` wire model and YAML template parsing.
//!
//! Questionnaire templates are authored as YAML and parsed strictly: unknown keys and wrong
//! types are rejected with the path of the offending field. The runtime-only fields (`date`
//! and `url`) are absent from templates and filled in by [`Questionnaire::stamped`].

use crate::datatypes::Coding;
use crate::{FhirError, FhirResult};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Wire representation of a questionnaire.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct Questionnaire {
    #[serde(rename = "resourceType")]
    pub resource_type: String,

    pub id: String,

    pub status: String,

    pub title: String,

    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default)]
    pub item: Vec<QuestionnaireItem>,
}

/// A question or a group of questions.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct QuestionnaireItem {
    #[serde(rename = "linkId")]
    pub link_id: String,

    pub text: String,

    /// `group`, `string`, `date`, `integer`, `decimal`, `boolean`, `choice` or `text`.
    #[serde(rename = "type")]
    pub item_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    /// Unit hint for numeric answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    #[serde(rename = "enableWhen", default, skip_serializing_if = "Vec::is_empty")]
    pub enable_when: Vec<EnableWhen>,

    #[serde(rename = "answerOption", default, skip_serializing_if = "Vec::is_empty")]
    pub answer_option: Vec<AnswerOption>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub item: Vec<QuestionnaireItem>,
}

/// Condition that enables an item based on another item's boolean answer.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct EnableWhen {
    pub question: String,
    pub operator: String,
    #[serde(rename = "answerBoolean")]
    pub answer_boolean: bool,
}

/// One permitted answer of a `choice` item.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct AnswerOption {
    #[serde(rename = "valueCoding")]
    pub value_coding: Coding,
}

impl Questionnaire {
    /// Parse a questionnaire template from YAML text.
    ///
    /// Uses `serde_path_to_error` so a schema mismatch names the failing field
    /// (for example `item.0.item.2.type`).
    ///
    /// # Errors
    ///
    /// Returns [`FhirError`] if:
    /// - the YAML does not match the wire schema (unknown keys, wrong types),
    /// - `resourceType` is not `Questionnaire`,
    /// - a `linkId` is repeated anywhere in the item tree.
    pub fn parse(yaml_text: &str) -> FhirResult<Questionnaire> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

        let wire = match serde_path_to_error::deserialize::<_, Questionnaire>(deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = match err.path().iter().next() {
                    Some(_) => err.path().to_string(),
                    None => "<root>".to_string(),
                };
                let source = err.into_inner();
                return Err(FhirError::Translation(format!(
                    "Questionnaire schema mismatch at {path}: {source}"
                )));
            }
        };

        if wire.resource_type != "Questionnaire" {
            return Err(FhirError::InvalidInput(format!(
                "Expected resourceType 'Questionnaire', got '{}'",
                wire.resource_type
            )));
        }

        let mut seen = std::collections::HashSet::new();
        if let Some(dup) = first_duplicate_link_id(&wire.item, &mut seen) {
            return Err(FhirError::InvalidInput(format!(
                "Questionnaire '{}' repeats linkId '{dup}'",
                wire.id
            )));
        }

        Ok(wire)
    }

    /// Return a copy carrying the given authoring `date` and canonical `url`.
    pub fn stamped(mut self, date: String, url: String) -> Self {
        self.date = Some(date);
        self.url = Some(url);
        self
    }

    /// Total number of items, counting nested ones.
    pub fn item_count(&self) -> usize {
        fn count(items: &[QuestionnaireItem]) -> usize {
            items.iter().map(|i| 1 + count(&i.item)).sum()
        }
        count(&self.item)
    }
}

fn first_duplicate_link_id<'a>(
    items: &'a [QuestionnaireItem],
    seen: &mut std::collections::HashSet<&'a str>,
) -> Option<&'a str> {
    for item in items {
        if !seen.insert(item.link_id.as_str()) {
            return Some(item.link_id.as_str());
        }
        if let Some(dup) = first_duplicate_link_id(&item.item, seen) {
            return Some(dup);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"resourceType: Questionnaire
id: sample-q1
status: draft
title: Sample
description: A sample questionnaire.
item:
  - linkId: "1"
    text: Vital Signs
    type: group
    item:
      - linkId: "1.1"
        text: Blood Pressure (Systolic)
        type: integer
        unit: mmHg
      - linkId: "1.2"
        text: Any bleeding?
        type: boolean
        required: true
  - linkId: "2"
    text: Choices
    type: group
    item:
      - linkId: "2.1"
        text: Fetal movements felt?
        type: choice
        answerOption:
          - valueCoding: {code: "Y", display: "Yes"}
          - valueCoding: {code: "N", display: "No"}
      - linkId: "2.2"
        text: For how long (days)?
        type: integer
        enableWhen:
          - question: "2.1"
            operator: "="
            answerBoolean: true
"#;

    #[test]
    fn parses_nested_items() {
        let q = Questionnaire::parse(SAMPLE).expect("parse sample");
        assert_eq!(q.id, "sample-q1");
        assert_eq!(q.item.len(), 2);
        assert_eq!(q.item_count(), 6);
        assert_eq!(q.item[0].item[0].unit.as_deref(), Some("mmHg"));
        assert_eq!(q.item[0].item[1].required, Some(true));
        assert_eq!(q.item[1].item[0].answer_option[1].value_coding.code, "N");
        assert!(q.item[1].item[1].enable_when[0].answer_boolean);
        assert!(q.date.is_none());
        assert!(q.url.is_none());
    }

    #[test]
    fn renders_fhir_key_names() {
        let q = Questionnaire::parse(SAMPLE)
            .expect("parse sample")
            .stamped("2024-01-01T00:00:00".into(), "http://localhost/q".into());

        let value = serde_json::to_value(&q).expect("serialise");
        assert_eq!(value["resourceType"], "Questionnaire");
        assert_eq!(value["date"], "2024-01-01T00:00:00");
        assert_eq!(value["url"], "http://localhost/q");
        assert_eq!(value["item"][0]["linkId"], "1");
        assert_eq!(value["item"][0]["type"], "group");
        assert_eq!(
            value["item"][1]["item"][0]["answerOption"][0]["valueCoding"]["display"],
            "Yes"
        );
        assert_eq!(value["item"][1]["item"][1]["enableWhen"][0]["answerBoolean"], true);
        // Optional keys stay absent rather than null.
        assert!(value["item"][0].get("required").is_none());
        assert!(value["item"][1]["item"][0]["answerOption"][0]["valueCoding"]
            .get("system")
            .is_none());
    }

    #[test]
    fn rejects_unknown_keys_with_path() {
        let input = r#"resourceType: Questionnaire
id: q
status: draft
title: t
description: d
item:
  - linkId: "1"
    text: x
    type: string
    colour: red
"#;

        match Questionnaire::parse(input) {
            Err(FhirError::Translation(msg)) => {
                assert!(msg.contains("item[0]") || msg.contains("item.0"), "{msg}");
                assert!(msg.contains("colour"), "{msg}");
            }
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_wrong_types() {
        let input = r#"resourceType: Questionnaire
id: q
status: draft
title: t
description: d
item:
  - linkId: "1"
    text: x
    type: boolean
    required: "sometimes"
"#;

        match Questionnaire::parse(input) {
            Err(FhirError::Translation(msg)) => assert!(msg.contains("required"), "{msg}"),
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_invalid_resource_type() {
        let input = "resourceType: Patient\nid: q\nstatus: draft\ntitle: t\ndescription: d\n";

        match Questionnaire::parse(input) {
            Err(FhirError::InvalidInput(msg)) => {
                assert!(msg.contains("Questionnaire"));
                assert!(msg.contains("Patient"));
            }
            other => panic!("expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_duplicate_link_ids() {
        let input = r#"resourceType: Questionnaire
id: q
status: draft
title: t
description: d
item:
  - linkId: "1"
    text: a
    type: group
    item:
      - linkId: "1"
        text: b
        type: string
"#;

        match Questionnaire::parse(input) {
            Err(FhirError::InvalidInput(msg)) => assert!(msg.contains("linkId '1'"), "{msg}"),
            other => panic!("expected InvalidInput error, got {other:?}"),
        }
    }
}
