use serde::Deserialize;
use serde_json::Value;

/// A success body sorted into one of the shapes the API is known to return.
/// Tried in order, so a body with both `Items` and `RxNormConcepts` is a
/// drug list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ResponseShape {
    Drugs(DrugList),
    Concepts(ConceptList),
    Other(Value),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DrugList {
    /// Entries that are not JSON objects are kept but not listed.
    #[serde(rename = "Items")]
    pub items: Vec<Value>,
    #[serde(rename = "TotalResultCount", default)]
    pub total_result_count: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConceptList {
    #[serde(rename = "RxNormConcepts")]
    pub concepts: Vec<RxNormConcept>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RxNormConcept {
    #[serde(rename = "RxNormID", default)]
    pub id: Option<Value>,
    #[serde(rename = "RxNormName", default)]
    pub name: Option<Value>,
    #[serde(rename = "RxNormType", default)]
    pub concept_type: Option<Value>,
}

impl ResponseShape {
    pub fn decode(body: &Value) -> Self {
        ResponseShape::deserialize(body).unwrap_or_else(|_| ResponseShape::Other(body.clone()))
    }
}

impl DrugList {
    /// `TotalResultCount` as displayed, `0` when the field is absent.
    pub fn total(&self) -> String {
        self.total_result_count
            .as_ref()
            .map(display_value)
            .unwrap_or_else(|| "0".to_string())
    }
}

/// Scalar rendering: bare strings, `None` for null, JSON text otherwise.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "None".to_string(),
        other => other.to_string(),
    }
}

pub fn display_optional(value: &Option<Value>) -> String {
    value
        .as_ref()
        .map(display_value)
        .unwrap_or_else(|| "None".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn items_decode_as_a_drug_list() {
        let body = json!({"Items": [{"PrescribableDrugDesc": "Aspirin"}], "TotalResultCount": 1});
        match ResponseShape::decode(&body) {
            ResponseShape::Drugs(list) => {
                assert_eq!(list.items.len(), 1);
                assert_eq!(list.total(), "1");
                assert_eq!(list.items[0]["PrescribableDrugDesc"], "Aspirin");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn stray_items_keep_the_drug_list() {
        let body = json!({"Items": [{"PrescribableDrugDesc": "Aspirin"}, "junk"], "TotalResultCount": 2});
        match ResponseShape::decode(&body) {
            ResponseShape::Drugs(list) => {
                assert_eq!(list.items.len(), 2);
                assert_eq!(list.total(), "2");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn missing_total_defaults_to_zero() {
        let body = json!({"Items": []});
        match ResponseShape::decode(&body) {
            ResponseShape::Drugs(list) => assert_eq!(list.total(), "0"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn rx_norm_concepts_decode_with_missing_fields() {
        let body = json!({"RxNormConcepts": [{"RxNormID": 1191, "RxNormName": "aspirin"}]});
        match ResponseShape::decode(&body) {
            ResponseShape::Concepts(list) => {
                let concept = &list.concepts[0];
                assert_eq!(display_optional(&concept.id), "1191");
                assert_eq!(display_optional(&concept.name), "aspirin");
                assert_eq!(display_optional(&concept.concept_type), "None");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn items_win_over_concepts() {
        let body = json!({"Items": [], "RxNormConcepts": []});
        assert!(matches!(
            ResponseShape::decode(&body),
            ResponseShape::Drugs(_)
        ));
    }

    #[test]
    fn unknown_shapes_fall_back() {
        for body in [
            json!({"PrescribableDrugID": 583214}),
            json!({"Items": "not a list"}),
            json!([1, 2, 3]),
            Value::Null,
        ] {
            assert_eq!(ResponseShape::decode(&body), ResponseShape::Other(body.clone()));
        }
    }
}
