#![forbid(unsafe_code)]

//! Color variants and regional prices.
//!
//! [`VariantTable`] is the single source of variant data (display name,
//! accent color, glow, product asset). It always contains its default entry,
//! and lookups of unknown ids fall back to it, so a stale or mistyped id can
//! never leave a consumer without something to render.
//!
//! [`PriceTable`] maps currency codes to whole-unit prices and remembers the
//! selected currency.

/// One color variant of the product.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
pub struct Variant {
    /// Stable id, also the panel id in the color strip.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Accent color as `#RRGGBB`.
    pub hex: String,
    /// Glow color as a CSS color string.
    pub glow: String,
    /// Product image asset path.
    pub asset: String,
}

impl Variant {
    fn new(id: &str, name: &str, hex: &str, glow: &str, asset: &str) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            hex: hex.into(),
            glow: glow.into(),
            asset: asset.into(),
        }
    }

    /// Accent color as RGB bytes, if `hex` is a well-formed `#RRGGBB`.
    #[must_use]
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        let digits = self.hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some((channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Errors building a variant table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The default id is not among the variants.
    MissingDefault(String),
    /// Two variants share an id.
    DuplicateId(String),
    /// A currency code is not in the price table.
    UnknownCurrency(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingDefault(id) => write!(f, "default variant {id:?} is not in the table"),
            Self::DuplicateId(id) => write!(f, "duplicate variant id {id:?}"),
            Self::UnknownCurrency(code) => write!(f, "unknown currency {code:?}"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Ordered variant list with a guaranteed default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantTable {
    variants: Vec<Variant>,
    default: usize,
}

impl VariantTable {
    /// Build a table. `default_id` must name one of the variants.
    pub fn new(variants: Vec<Variant>, default_id: &str) -> Result<Self, CatalogError> {
        for (i, v) in variants.iter().enumerate() {
            if variants[..i].iter().any(|w| w.id == v.id) {
                return Err(CatalogError::DuplicateId(v.id.clone()));
            }
        }
        let default = variants
            .iter()
            .position(|v| v.id == default_id)
            .ok_or_else(|| CatalogError::MissingDefault(default_id.to_string()))?;
        Ok(Self { variants, default })
    }

    /// The product's five finishes, defaulting to space gray.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            variants: vec![
                Variant::new(
                    "silver",
                    "Silver",
                    "#C0C0C0",
                    "rgba(255,255,255,.3)",
                    "assets/silver.png",
                ),
                Variant::new(
                    "pink",
                    "Pink",
                    "#F7C0CB",
                    "rgba(255,200,210,.3)",
                    "assets/pink.png",
                ),
                Variant::new(
                    "space-gray",
                    "Space Gray",
                    "#6E6E6E",
                    "rgba(100,100,100,.3)",
                    "assets/space-gray.png",
                ),
                Variant::new(
                    "sky-blue",
                    "Sky Blue",
                    "#ADD8E6",
                    "rgba(173,216,230,.3)",
                    "assets/sky-blue.png",
                ),
                Variant::new(
                    "green",
                    "Green",
                    "#90EE90",
                    "rgba(144,238,144,.3)",
                    "assets/green.png",
                ),
            ],
            default: 2,
        }
    }

    /// The default variant.
    #[must_use]
    pub fn default_variant(&self) -> &Variant {
        &self.variants[self.default]
    }

    /// Variant `id`, or the default when unknown.
    #[must_use]
    pub fn get(&self, id: &str) -> &Variant {
        self.lookup(id).unwrap_or_else(|| self.default_variant())
    }

    /// Variant `id`, if present.
    #[must_use]
    pub fn lookup(&self, id: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id == id)
    }

    /// Variant at strip position `index`.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&Variant> {
        self.variants.get(index)
    }

    /// Variant ids in strip order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(|v| v.id.as_str())
    }

    /// Number of variants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Always false: the table holds at least its default.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

/// Currency code to whole-unit price, with a selected currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceTable {
    prices: Vec<(String, u64)>,
    selected: usize,
}

impl Default for PriceTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PriceTable {
    /// Regional prices, USD selected.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            prices: [("USD", 549), ("EUR", 499), ("GBP", 449), ("JPY", 60_000), ("CAD", 699)]
                .into_iter()
                .map(|(c, p)| (c.to_string(), p))
                .collect(),
            selected: 0,
        }
    }

    /// Currency codes in display order.
    pub fn currencies(&self) -> impl Iterator<Item = &str> {
        self.prices.iter().map(|(c, _)| c.as_str())
    }

    /// Price in `code`.
    #[must_use]
    pub fn price(&self, code: &str) -> Option<u64> {
        self.prices.iter().find(|(c, _)| c == code).map(|(_, p)| *p)
    }

    /// Selected currency code.
    #[must_use]
    pub fn selected(&self) -> &str {
        &self.prices[self.selected].0
    }

    /// Switch currency.
    pub fn select(&mut self, code: &str) -> Result<(), CatalogError> {
        self.selected = self
            .prices
            .iter()
            .position(|(c, _)| c == code)
            .ok_or_else(|| CatalogError::UnknownCurrency(code.to_string()))?;
        Ok(())
    }

    /// Price label for the selected currency, e.g. `"JPY 60,000"`.
    #[must_use]
    pub fn label(&self) -> String {
        let (code, amount) = &self.prices[self.selected];
        format!("{code} {}", group_thousands(*amount))
    }
}

/// Format with comma thousands separators.
#[must_use]
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
