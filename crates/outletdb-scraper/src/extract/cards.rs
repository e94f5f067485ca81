//! DOM pass: split the page into outlet cards and copy out what each holds.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

static CARD: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.addressBox").expect("valid selector"));
static JSON_LD: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#).expect("valid selector")
});
static ICON: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img.addressIcon").expect("valid selector"));

/// One outlet card with no DOM handles attached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RawCard {
    /// Zero-based position of the card on the page.
    pub index: usize,
    /// Text of each JSON-LD block, in document order.
    pub blocks: Vec<String>,
    /// `(src, alt)` of each icon; missing attributes are empty strings.
    pub icons: Vec<(String, String)>,
}

impl RawCard {
    pub fn icon_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.icons.iter().map(|(src, alt)| (src.as_str(), alt.as_str()))
    }
}

pub(crate) fn parse_cards(html: &str) -> Vec<RawCard> {
    let document = Html::parse_document(html);
    document
        .select(&CARD)
        .enumerate()
        .map(|(index, card)| read_card(index, card))
        .collect()
}

fn read_card(index: usize, card: ElementRef<'_>) -> RawCard {
    let blocks = card
        .select(&JSON_LD)
        .map(|script| script.text().collect::<String>())
        .collect();
    let icons = card
        .select(&ICON)
        .map(|img| {
            let attrs = img.value();
            (
                attrs.attr("src").unwrap_or_default().to_string(),
                attrs.attr("alt").unwrap_or_default().to_string(),
            )
        })
        .collect();
    RawCard {
        index,
        blocks,
        icons,
    }
}
