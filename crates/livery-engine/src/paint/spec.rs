use serde::Deserialize;
use serde_json::{Value, json};

/// Clamps to `[0, 1]`. Non-finite input maps to 0.
#[inline]
pub fn clamp01(x: f64) -> f64 {
    if x.is_finite() { x.clamp(0.0, 1.0) } else { 0.0 }
}

/// Reads a number out of a loosely typed JSON value.
///
/// Numbers pass through; numeric strings are parsed; everything else is `None`.
pub fn json_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Canonical paint of one slot.
///
/// Invariant: every channel is finite and within `[0, 1]`. Constructors and
/// decoders clamp; fields are public for reading and pattern matching, and
/// [`PaintSpec::sanitized`] restores the invariant after direct writes.
/// Deserializing goes through [`PaintSpec::from_json`], so it clamps too.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct PaintSpec {
    /// Straight-alpha RGBA.
    pub base_color: [f64; 4],
    pub metallic: f64,
    pub roughness: f64,
    pub clearcoat: f64,
    pub clearcoat_roughness: f64,
}

impl Default for PaintSpec {
    fn default() -> Self {
        Self {
            base_color: [0.0, 0.0, 0.0, 1.0],
            metallic: 0.0,
            roughness: 0.0,
            clearcoat: 0.0,
            clearcoat_roughness: 0.0,
        }
    }
}

impl From<Value> for PaintSpec {
    fn from(value: Value) -> Self {
        Self::from_json(&value)
    }
}

impl PaintSpec {
    #[inline]
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { base_color: [r, g, b, a], ..Self::default() }.sanitized()
    }

    #[inline]
    pub fn with_finish(mut self, metallic: f64, roughness: f64, clearcoat: f64, clearcoat_roughness: f64) -> Self {
        self.metallic = metallic;
        self.roughness = roughness;
        self.clearcoat = clearcoat;
        self.clearcoat_roughness = clearcoat_roughness;
        self.sanitized()
    }

    /// Returns a copy with every channel clamped into range.
    pub fn sanitized(self) -> Self {
        let [r, g, b, a] = self.base_color;
        Self {
            base_color: [clamp01(r), clamp01(g), clamp01(b), if a.is_finite() { a.clamp(0.0, 1.0) } else { 1.0 }],
            metallic: clamp01(self.metallic),
            roughness: clamp01(self.roughness),
            clearcoat: clamp01(self.clearcoat),
            clearcoat_roughness: clamp01(self.clearcoat_roughness),
        }
    }

    /// Tolerant decode of `{baseColor, metallic, roughness, clearcoat, clearcoatRoughness}`.
    ///
    /// Missing or non-numeric entries fall back to the defaults (0, alpha 1);
    /// present values are clamped. A non-object decodes to the default paint.
    pub fn from_json(value: &Value) -> Self {
        let mut paint = Self::default();
        let Some(obj) = value.as_object() else {
            return paint;
        };

        if let Some(channels) = obj.get("baseColor").and_then(Value::as_array) {
            for (slot, v) in paint.base_color.iter_mut().zip(channels) {
                if let Some(n) = json_number(v) {
                    *slot = n;
                }
            }
        }
        let scalar = |key: &str| obj.get(key).and_then(json_number).unwrap_or(0.0);
        paint.metallic = scalar("metallic");
        paint.roughness = scalar("roughness");
        paint.clearcoat = scalar("clearcoat");
        paint.clearcoat_roughness = scalar("clearcoatRoughness");

        paint.sanitized()
    }

    /// Decodes an array of paints. Anything but an array yields an empty list.
    pub fn list_from_json(value: &Value) -> Vec<Self> {
        value
            .as_array()
            .map(|items| items.iter().map(Self::from_json).collect())
            .unwrap_or_default()
    }

    /// Wire shape, built directly so encoding can never fail.
    pub fn to_json(&self) -> Value {
        json!({
            "baseColor": self.base_color,
            "metallic": self.metallic,
            "roughness": self.roughness,
            "clearcoat": self.clearcoat,
            "clearcoatRoughness": self.clearcoat_roughness,
        })
    }

    pub fn list_to_json(paints: &[PaintSpec]) -> Value {
        Value::Array(paints.iter().map(PaintSpec::to_json).collect())
    }
}
