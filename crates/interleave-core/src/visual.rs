//! Image slot extraction for interleaved rows.
//!
//! Rows store up to [`MAX_VISUALS`] images under `image_0` .. `image_15`.
//! Decoding is delegated to an [`ImageDecoder`].

use serde_json::Value;

pub const MAX_VISUALS: usize = 16;

/// Decodes the stored form of one image slot (a path, URL or encoded blob).
pub trait ImageDecoder {
    type Image;

    fn decode(&self, slot: usize, raw: &Value) -> anyhow::Result<Self::Image>;
}

/// Decoded images in slot order.
///
/// Absent and null slots are skipped. A slot that fails to decode is logged
/// and skipped; it never fails the row.
pub fn collect_visuals<D: ImageDecoder>(doc: &Value, decoder: &D) -> Vec<D::Image> {
    let mut visuals = Vec::new();
    for slot in 0..MAX_VISUALS {
        let Some(raw) = doc.get(format!("image_{slot}")) else {
            continue;
        };
        if raw.is_null() {
            continue;
        }
        match decoder.decode(slot, raw) {
            Ok(img) => visuals.push(img),
            Err(e) => {
                tracing::warn!(slot, error = %e, "failed to open image_{slot}; skipping");
            }
        }
    }
    visuals
}

/// Decoder that returns the stored reference untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReferenceDecoder;

impl ImageDecoder for ReferenceDecoder {
    type Image = String;

    fn decode(&self, slot: usize, raw: &Value) -> anyhow::Result<String> {
        match raw {
            Value::String(s) if !s.is_empty() => Ok(s.clone()),
            Value::Object(obj) => obj
                .get("path")
                .and_then(Value::as_str)
                .map(ToString::to_string)
                .ok_or_else(|| anyhow::anyhow!("image_{slot}: object without 'path'")),
            other => anyhow::bail!("image_{slot}: unsupported image reference {other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn collects_slots_in_order_and_skips_nulls() {
        let doc = json!({
            "image_2": "c.png",
            "image_0": "a.png",
            "image_1": null,
            "image_15": {"path": "p.png"},
            "image_16": "ignored.png"
        });
        let out = collect_visuals(&doc, &ReferenceDecoder);
        assert_eq!(out, vec!["a.png", "c.png", "p.png"]);
    }

    #[test]
    fn undecodable_slot_is_skipped() {
        let doc = json!({"image_0": 42, "image_1": "b.png"});
        let out = collect_visuals(&doc, &ReferenceDecoder);
        assert_eq!(out, vec!["b.png"]);
    }

    #[test]
    fn row_without_images_yields_nothing() {
        assert!(collect_visuals(&json!({"question": "q"}), &ReferenceDecoder).is_empty());
    }
}
