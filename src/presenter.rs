use crate::constants::ITEMS;
use crate::response::{display_optional, display_value, ConceptList, DrugList, ResponseShape};
use crate::result::{ApiResult, AUTH_ERROR_MESSAGE};
use clap::ValueEnum;
use itertools::Itertools;
use serde_json::Value;
use std::io::{self, Write};

const COMMON_FIELDS: [(&str, &str); 6] = [
    ("Drug", "PrescribableDrugDesc"),
    ("Generic", "DispensableGenericDesc"),
    ("Category", "DefaultETCDesc"),
    ("RxNorm ID", "RxNormID"),
    ("Route", "RouteDesc"),
    ("Dose Form", "DoseFormDesc"),
];

const NO_RESULTS_SUGGESTIONS: [&str; 3] = [
    "Checking the spelling",
    "Using a different search term",
    "Trying a more common drug name",
];

/// Which parts of a successful response to render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum View {
    Formatted,
    Raw,
    Analysis,
    #[default]
    All,
}

impl View {
    fn shows(&self, other: View) -> bool {
        *self == View::All || *self == other
    }
}

/// Renders an [`ApiResult`] as plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Presenter {
    view: View,
    details: bool,
}

impl Presenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(mut self, view: View) -> Self {
        self.view = view;
        self
    }

    /// Print the full JSON of every listed drug under its summary.
    pub fn details(mut self, details: bool) -> Self {
        self.details = details;
        self
    }

    /// ```rust
    /// use fdb_rs::{ApiResult, Presenter};
    ///
    /// let text = Presenter::new().render(&ApiResult::AuthError);
    /// assert!(text.contains("Authentication failed"));
    /// ```
    pub fn render(&self, result: &ApiResult) -> String {
        let mut out = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.present(result, &mut out);
        String::from_utf8_lossy(&out).into_owned()
    }

    pub fn present<W: Write>(&self, result: &ApiResult, out: &mut W) -> io::Result<()> {
        match result {
            ApiResult::Success { status, body } => self.present_success(*status, body, out),
            ApiResult::NoResults => {
                writeln!(out, "No results found. Try:")?;
                for suggestion in NO_RESULTS_SUGGESTIONS {
                    writeln!(out, "- {}", suggestion)?;
                }
                Ok(())
            }
            ApiResult::AuthError => writeln!(out, "Error: {}", AUTH_ERROR_MESSAGE),
            ApiResult::Failure {
                message,
                status,
                raw_body,
            } => {
                writeln!(out, "Error: {}", message)?;
                if let Some(status) = status {
                    writeln!(out, "Status code: {}", status)?;
                }
                if let Some(raw) = raw_body {
                    writeln!(out, "Error Response:")?;
                    match serde_json::from_str::<Value>(raw) {
                        Ok(json) => write_pretty(out, &json)?,
                        Err(_) => writeln!(out, "{}", raw)?,
                    }
                }
                Ok(())
            }
        }
    }

    fn present_success<W: Write>(&self, status: u16, body: &Value, out: &mut W) -> io::Result<()> {
        writeln!(out, "Request successful! Status code: {}", status)?;

        if self.view.shows(View::Formatted) {
            writeln!(out, "\n== Formatted View ==")?;
            match ResponseShape::decode(body) {
                ResponseShape::Drugs(list) => self.write_drugs(&list, out)?,
                ResponseShape::Concepts(list) => write_concepts(&list, out)?,
                ResponseShape::Other(Value::Null) => writeln!(out, "No data to display")?,
                ResponseShape::Other(other) => write_pretty(out, &other)?,
            }
        }

        if self.view.shows(View::Raw) {
            writeln!(out, "\n== Raw JSON ==")?;
            write_pretty(out, body)?;
        }

        if self.view.shows(View::Analysis) {
            writeln!(out, "\n== Analysis ==")?;
            write_analysis(body, out)?;
        }

        Ok(())
    }

    fn write_drugs<W: Write>(&self, list: &DrugList, out: &mut W) -> io::Result<()> {
        writeln!(out, "Total Results: {}", list.total())?;
        for item in list.items.iter().filter_map(Value::as_object) {
            writeln!(out, "---")?;
            for (label, field) in COMMON_FIELDS {
                if let Some(value) = item.get(field) {
                    writeln!(out, "{}: {}", label, display_value(value))?;
                }
            }
            if self.details {
                writeln!(out, "Details:")?;
                write_pretty(out, &Value::Object(item.clone()))?;
            }
        }
        Ok(())
    }
}

fn write_concepts<W: Write>(list: &ConceptList, out: &mut W) -> io::Result<()> {
    writeln!(out, "RxNorm Concepts:")?;
    for concept in &list.concepts {
        writeln!(out, "---")?;
        writeln!(out, "RxNorm ID: {}", display_optional(&concept.id))?;
        writeln!(out, "Name: {}", display_optional(&concept.name))?;
        writeln!(out, "Type: {}", display_optional(&concept.concept_type))?;
    }
    Ok(())
}

fn write_analysis<W: Write>(body: &Value, out: &mut W) -> io::Result<()> {
    writeln!(out, "Response Analysis:")?;
    match body {
        Value::Object(map) => {
            writeln!(out, "Number of top-level keys: {}", map.len())?;
            writeln!(out, "Available fields: {}", map.keys().join(", "))?;
            if let Some(Value::Array(items)) = map.get(ITEMS) {
                writeln!(out, "Number of items: {}", items.len())?;
                if let Some(Value::Object(first)) = items.first() {
                    writeln!(out, "Fields in each item: {}", first.keys().join(", "))?;
                }
            }
        }
        Value::Array(items) => {
            writeln!(out, "Number of items: {}", items.len())?;
            if let Some(Value::Object(first)) = items.first() {
                writeln!(out, "Fields in first item: {}", first.keys().join(", "))?;
            }
        }
        _ => writeln!(out, "No data to analyze")?,
    }
    Ok(())
}

fn write_pretty<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn success(body: Value) -> ApiResult {
        ApiResult::Success { status: 200, body }
    }

    #[test]
    fn drug_list_shows_total_and_common_fields() {
        let result = success(json!({
            "Items": [{"PrescribableDrugDesc": "Aspirin"}],
            "TotalResultCount": 1
        }));
        let text = Presenter::new().view(View::Formatted).render(&result);

        assert!(text.starts_with("Request successful! Status code: 200\n"));
        assert!(text.contains("Total Results: 1\n"));
        assert!(text.contains("---\nDrug: Aspirin\n"));
        assert!(!text.contains("== Raw JSON =="));
    }

    #[test]
    fn drug_list_lists_only_present_fields_in_fixed_order() {
        let result = success(json!({
            "Items": [{
                "RouteDesc": "oral",
                "PrescribableDrugDesc": "clopidogrel 75 mg tablet",
                "RxNormID": 309362,
                "Unrelated": true
            }]
        }));
        let text = Presenter::new().view(View::Formatted).render(&result);

        assert!(text.contains(
            "Total Results: 0\n---\nDrug: clopidogrel 75 mg tablet\nRxNorm ID: 309362\nRoute: oral\n"
        ));
        assert!(!text.contains("Unrelated"));
        assert!(!text.contains("Details:"));
    }

    #[test]
    fn non_object_items_are_skipped() {
        let result = success(json!({
            "Items": [{"PrescribableDrugDesc": "Aspirin"}, "junk", 7],
            "TotalResultCount": 3
        }));
        let text = Presenter::new().view(View::Formatted).render(&result);

        assert!(text.contains("Total Results: 3
---
Drug: Aspirin
"));
        assert_eq!(text.matches("---").count(), 1);
        assert!(!text.contains("junk"));
    }

    #[test]
    fn details_add_the_item_json() {
        let result = success(json!({"Items": [{"PrescribableDrugDesc": "Aspirin", "Extra": 1}]}));
        let text = Presenter::new()
            .view(View::Formatted)
            .details(true)
            .render(&result);

        assert!(text.contains("Details:\n{\n  \"PrescribableDrugDesc\": \"Aspirin\",\n  \"Extra\": 1\n}\n"));
    }

    #[test]
    fn concepts_print_none_for_missing_values() {
        let result = success(json!({"RxNormConcepts": [{"RxNormID": "1191", "RxNormType": "IN"}]}));
        let text = Presenter::new().view(View::Formatted).render(&result);

        assert!(text.contains("RxNorm Concepts:\n---\nRxNorm ID: 1191\nName: None\nType: IN\n"));
    }

    #[test]
    fn other_shapes_print_pretty_json() {
        let text = Presenter::new()
            .view(View::Formatted)
            .render(&success(json!({"PrescribableDrugID": 1})));
        assert!(text.contains("{\n  \"PrescribableDrugID\": 1\n}\n"));

        let text = Presenter::new()
            .view(View::Formatted)
            .render(&success(Value::Null));
        assert!(text.contains("No data to display"));
    }

    #[test]
    fn raw_view_keeps_server_field_order() {
        let body: Value = serde_json::from_str("{\"b\":1,\"a\":2}").unwrap();
        let text = Presenter::new().view(View::Raw).render(&success(body));
        assert!(text.contains("== Raw JSON ==\n{\n  \"b\": 1,\n  \"a\": 2\n}\n"));
        assert!(!text.contains("== Analysis =="));
    }

    #[test]
    fn analysis_of_an_item_collection() {
        let result = success(json!({
            "Items": [{"PrescribableDrugDesc": "Aspirin", "RxNormID": 1}],
            "TotalResultCount": 1
        }));
        let text = Presenter::new().view(View::Analysis).render(&result);

        assert!(text.contains("Number of top-level keys: 2\n"));
        assert!(text.contains("Available fields: Items, TotalResultCount\n"));
        assert!(text.contains("Number of items: 1\n"));
        assert!(text.contains("Fields in each item: PrescribableDrugDesc, RxNormID\n"));
    }

    #[test]
    fn analysis_of_an_array_and_a_scalar() {
        let text = Presenter::new()
            .view(View::Analysis)
            .render(&success(json!([{"a": 1, "b": 2}, {"a": 3}])));
        assert!(text.contains("Number of items: 2\nFields in first item: a, b\n"));

        let text = Presenter::new()
            .view(View::Analysis)
            .render(&success(json!("text")));
        assert!(text.contains("No data to analyze"));
    }

    #[test]
    fn all_views_are_shown_by_default() {
        let text = Presenter::new().render(&success(json!({"Items": []})));
        let formatted = text.find("== Formatted View ==").unwrap();
        let raw = text.find("== Raw JSON ==").unwrap();
        let analysis = text.find("== Analysis ==").unwrap();
        assert!(formatted < raw && raw < analysis);
    }

    #[test]
    fn no_results_is_a_suggestion() {
        let text = Presenter::new().render(&ApiResult::NoResults);
        assert_eq!(
            text,
            "No results found. Try:\n- Checking the spelling\n- Using a different search term\n- Trying a more common drug name\n"
        );
    }

    #[test]
    fn failure_with_json_body_is_structured() {
        let result = ApiResult::Failure {
            message: "500 Server Error: Internal Server Error for url: https://x".to_string(),
            status: Some(500),
            raw_body: Some("{\"Message\":\"boom\"}".to_string()),
        };
        let text = Presenter::new().render(&result);
        assert_eq!(
            text,
            "Error: 500 Server Error: Internal Server Error for url: https://x\nStatus code: 500\nError Response:\n{\n  \"Message\": \"boom\"\n}\n"
        );
    }

    #[test]
    fn failure_with_text_body_is_literal() {
        let result = ApiResult::Failure {
            message: "bad gateway".to_string(),
            status: None,
            raw_body: Some("<html>upstream down</html>".to_string()),
        };
        let text = Presenter::new().render(&result);
        assert_eq!(
            text,
            "Error: bad gateway\nError Response:\n<html>upstream down</html>\n"
        );
    }
}
