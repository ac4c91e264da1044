use interleave_core::errors::RecordError;
use interleave_core::model::EvalRecord;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// Metric keys under which a processed record is reported.
pub const METRIC_KEYS: [&str; 3] = ["mcq_acc", "oe_rouge", "oe_judge"];

/// One processed record, reported once under every metric key.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRows {
    record: EvalRecord,
}

impl MetricRows {
    pub fn record(&self) -> &EvalRecord {
        &self.record
    }

    pub fn into_record(self) -> EvalRecord {
        self.record
    }
}

impl Serialize for MetricRows {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(METRIC_KEYS.len()))?;
        for key in METRIC_KEYS {
            map.serialize_entry(key, &self.record)?;
        }
        map.end()
    }
}

/// Per-record processing: pairs the dataset row with the first model output.
///
/// A missing output is scored as an empty prediction.
pub fn process_results(doc: &Value, results: &[String]) -> Result<MetricRows, RecordError> {
    let prediction = results.first().cloned().unwrap_or_default();
    let record = EvalRecord::from_doc(doc, prediction)?;
    Ok(MetricRows { record })
}

/// Model outputs stored on a results row under `prediction` (or
/// `parsed_pred`). An absent field means no output; any value other than a
/// string is an error.
pub fn row_predictions(row: &Value) -> Result<Vec<String>, RecordError> {
    let (field, raw) = match (row.get("prediction"), row.get("parsed_pred")) {
        (Some(v), _) => ("prediction", v),
        (None, Some(v)) => ("parsed_pred", v),
        (None, None) => return Ok(Vec::new()),
    };
    match raw {
        Value::String(s) => Ok(vec![s.clone()]),
        _ => Err(RecordError::InvalidField {
            sample_id: sample_id_of(row),
            field,
            expected: "string",
        }),
    }
}

fn sample_id_of(row: &Value) -> String {
    match row.get("sample_id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => "<unknown>".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(prediction: Value) -> Value {
        json!({
            "sample_id": 7,
            "sub_task": "t",
            "question": "q",
            "question_type": "open-ended",
            "answer": "x",
            "prediction": prediction
        })
    }

    #[test]
    fn first_result_is_the_prediction() {
        let doc = json!({
            "sample_id": 3,
            "sub_task": "Puzzle",
            "question": "Which?",
            "question_type": "multi-choice",
            "answer": "B"
        });
        let rows = process_results(&doc, &["B. second".to_string(), "ignored".to_string()]).unwrap();
        assert_eq!(rows.record().prediction, "B. second");
        assert_eq!(rows.record().sample_id, "3");

        let v = serde_json::to_value(&rows).unwrap();
        assert_eq!(v["mcq_acc"]["parsed_pred"], "B. second");
        assert_eq!(v["oe_rouge"]["sub_task"], "Puzzle");
        assert!(v.get("oe_judge").is_some());
        assert_eq!(v.as_object().unwrap().len(), METRIC_KEYS.len());
    }

    #[test]
    fn no_results_means_empty_prediction() {
        let doc = json!({
            "sample_id": "a",
            "sub_task": "t",
            "question": "q",
            "question_type": "open-ended",
            "answer": "x"
        });
        assert_eq!(process_results(&doc, &[]).unwrap().into_record().prediction, "");
    }

    #[test]
    fn malformed_row_propagates() {
        assert!(process_results(&json!({"sample_id": "a"}), &[]).is_err());
    }

    #[test]
    fn string_prediction_is_read() {
        assert_eq!(row_predictions(&row(json!("the cup"))).unwrap(), vec!["the cup".to_string()]);

        let legacy = json!({"sample_id": 1, "parsed_pred": "B"});
        assert_eq!(row_predictions(&legacy).unwrap(), vec!["B".to_string()]);
    }

    #[test]
    fn absent_prediction_is_no_output() {
        assert!(row_predictions(&json!({"sample_id": 1})).unwrap().is_empty());
    }

    #[test]
    fn null_or_non_string_prediction_is_rejected() {
        for bad in [Value::Null, json!(4), json!(["A"])] {
            let err = row_predictions(&row(bad)).unwrap_err();
            assert_eq!(
                err,
                RecordError::InvalidField {
                    sample_id: "7".into(),
                    field: "prediction",
                    expected: "string",
                }
            );
        }
    }
}
