// src/recommend/icons.rs
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Shown for crops missing from the table.
pub const DEFAULT_ICON: &str = "🌾";

/// Closed crop → glyph table, keyed by lowercase crop label.
pub static CROP_ICONS: &[(&str, &str)] = &[
    ("rice", "🍚"),
    ("maize", "🌽"),
    ("chickpea", "🌰"),
    ("kidneybeans", "🥘"),
    ("pigeonpeas", "🥜"),
    ("mothbeans", "🌾"),
    ("mungbean", "🌱"),
    ("blackgram", "💅"),
    ("lentil", "🥣"),
    ("pomegranate", "🍎"),
    ("banana", "🍌"),
    ("mango", "🥭"),
    ("grapes", "🍇"),
    ("watermelon", "🍉"),
    ("muskmelon", "🍈"),
    ("apple", "🍏"),
    ("orange", "🍊"),
    ("papaya", "🍍"),
    ("coconut", "🥥"),
    ("cotton", "🤵"),
    ("jute", "🪢"),
    ("coffee", "☕"),
    ("potato", "🥔"),
    ("onion", "🧅"),
    ("tomato", "🍅"),
    ("broccoli", "🥦"),
    ("cabbage", "🥬"),
    ("carrot", "🥕"),
    ("beetroot", "🦒"),
];

static ICON_INDEX: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| CROP_ICONS.iter().copied().collect());

/// Case- and whitespace-insensitive lookup; never fails.
pub fn icon_for(crop: &str) -> &'static str {
    let key = crop.trim().to_lowercase();
    ICON_INDEX.get(key.as_str()).copied().unwrap_or(DEFAULT_ICON)
}
