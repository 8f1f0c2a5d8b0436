//! Chunk extraction tests

use proptest::prelude::*;

use super::extractor::{collapse_whitespace, extract_chunks, split_sentences, ContentExtractor};
use super::rules::{ChunkLimits, MAX_CHUNKS, MAX_CHUNK_CHARS};

#[test]
fn test_script_removed_paragraph_kept() {
    let html = "<html><body><script>alert(1)</script>\
                <p>Limited time offer, act now or miss out forever and ever</p></body></html>";

    assert_eq!(
        extract_chunks(html),
        vec!["Limited time offer, act now or miss out forever and ever".to_string()]
    );
}

#[test]
fn test_script_inside_paragraph_ignored() {
    let html = "<p>Only a few rooms remain <script>var tracking = 'secret payload';</script>\
                at this price</p><style>p { color: red; }</style>";

    let chunks = extract_chunks(html);
    assert_eq!(chunks, vec!["Only a few rooms remain at this price".to_string()]);
}

#[test]
fn test_source_priority_order() {
    let html = r#"
        <button>Yes, upgrade my plan now</button>
        <input type="SUBMIT" value="  Claim   my free gift  ">
        <p>First paragraph with enough words</p>
        <input type="text" value="typed text should never appear">
        <p>Second paragraph with enough words</p>
        <input type=" button " value="No thanks, I hate saving money">
    "#;

    assert_eq!(
        extract_chunks(html),
        vec![
            "First paragraph with enough words",
            "Second paragraph with enough words",
            "Yes, upgrade my plan now",
            "Claim my free gift",
            "No thanks, I hate saving money",
        ]
    );
}

#[test]
fn test_nested_markup_is_joined_and_collapsed() {
    let html = "<p>Only <b>2</b>\n\n   left   <i>in\tstock</i>!</p>";
    assert_eq!(extract_chunks(html), vec!["Only 2 left in stock !".to_string()]);
}

#[test]
fn test_short_and_few_word_candidates_dropped() {
    let html = "<p>Buy now</p>\
                <p>Supercalifragilisticexpialidocious words</p>\
                <p>ok ok ok</p>\
                <p>This one survives the filter</p>";

    assert_eq!(extract_chunks(html), vec!["This one survives the filter".to_string()]);
}

#[test]
fn test_duplicates_keep_first_occurrence() {
    let html = "<p>Hurry, offer ends tonight</p>\
                <button>Hurry,   offer ends tonight</button>\
                <p>Something else entirely here</p>";

    assert_eq!(
        extract_chunks(html),
        vec!["Hurry, offer ends tonight", "Something else entirely here"]
    );
}

#[test]
fn test_long_chunk_truncated_not_dropped() {
    let long = "word ".repeat(400);
    let html = format!("<p>{}</p>", long);

    let chunks = extract_chunks(&html);
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].chars().count(), MAX_CHUNK_CHARS);
    assert!(long.trim().starts_with(&chunks[0]));
}

#[test]
fn test_truncation_respects_multibyte_chars() {
    let long = "ñandú feliz ".repeat(200);
    let chunks = extract_chunks(&format!("<p>{}</p>", long));
    assert_eq!(chunks[0].chars().count(), MAX_CHUNK_CHARS);
}

#[test]
fn test_chunk_cap() {
    let html: String = (0..400)
        .map(|i| format!("<p>Paragraph number {} of this page</p>", i))
        .collect();

    let chunks = extract_chunks(&html);
    assert_eq!(chunks.len(), MAX_CHUNKS);
    assert_eq!(chunks[0], "Paragraph number 0 of this page");
    assert_eq!(chunks[299], "Paragraph number 299 of this page");
}

#[test]
fn test_sentence_fallback() {
    let html = "<html><head><title>Shop</title><style>.x{}</style></head><body>\
                <div>Only 3 left in stock! Order in the next 10 minutes. Is this ok? yes</div>\
                <span>Free shipping on all orders today.</span></body></html>";

    let chunks = extract_chunks(html);
    assert_eq!(
        chunks,
        vec![
            "Shop Only 3 left in stock!",
            "Order in the next 10 minutes.",
            "yes Free shipping on all orders today.",
        ]
    );
}

#[test]
fn test_fallback_not_used_when_elements_exist() {
    let html = "<div>Lots of body text that would split into sentences. Really.</div>\
                <p>One paragraph is enough here</p>";

    assert_eq!(extract_chunks(html), vec!["One paragraph is enough here".to_string()]);
}

#[test]
fn test_fallback_when_elements_are_empty() {
    let html = "<p>   </p><button></button><div>Subscribe today and save on every order.</div>";
    assert_eq!(
        extract_chunks(html),
        vec!["Subscribe today and save on every order.".to_string()]
    );
}

#[test]
fn test_empty_document() {
    assert!(extract_chunks("").is_empty());
    assert!(extract_chunks("<script>only script here at all</script>").is_empty());
}

#[test]
fn test_custom_limits() {
    let extractor = ContentExtractor::new(ChunkLimits {
        min_chars: 3,
        min_words: 1,
        max_chars: 5,
        max_chunks: 2,
    });
    let html = "<p>Buy now</p><p>Sale!</p><p>Third</p>";

    assert_eq!(extractor.extract(html), vec!["Buy n", "Sale!"]);
}

#[test]
fn test_split_sentences() {
    assert_eq!(split_sentences("A b. C d! E f? G"), vec!["A b.", "C d!", "E f?", "G"]);
    assert_eq!(split_sentences("Version 2.0 is out"), vec!["Version 2.0 is out"]);
    assert_eq!(split_sentences("Ends."), vec!["Ends."]);
}

#[test]
fn test_collapse_whitespace() {
    assert_eq!(collapse_whitespace("  a \n\t b  "), "a b");
    assert_eq!(collapse_whitespace("\n"), "");
}

fn html_fragment() -> impl Strategy<Value = String> {
    let words = prop::collection::vec("[A-Za-z]{1,12}", 0..30).prop_map(|w| w.join(" "));
    prop::collection::vec(
        (0usize..6, words).prop_map(|(kind, text)| match kind {
            0 => format!("<p>{}</p>", text),
            1 => format!("<button>{}</button>", text),
            2 => format!("<input type=\"submit\" value=\"{}\">", text),
            3 => format!("<script>{}</script>", text),
            4 => format!("<div>{}. {}!</div>", text, text),
            _ => format!("<p>{}</p><p>{}</p>", text, text),
        }),
        0..40,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn prop_chunks_respect_limits(html in html_fragment()) {
        let chunks = extract_chunks(&html);
        prop_assert!(chunks.len() <= MAX_CHUNKS);

        let mut seen = std::collections::HashSet::new();
        for chunk in &chunks {
            let len = chunk.chars().count();
            prop_assert!((15..=MAX_CHUNK_CHARS).contains(&len));
            prop_assert!(chunk.split_whitespace().count() >= 3);
            prop_assert!(seen.insert(chunk.clone()), "duplicate chunk {}", chunk);
        }
    }

    #[test]
    fn prop_script_text_never_leaks(words in prop::collection::vec("[a-z]{3,8}", 3..10)) {
        let marker = format!("zzsecret {}", words.join(" "));
        let html = format!(
            "<p>Visible paragraph text goes here</p><script>{}</script><style>{}</style>",
            marker, marker
        );
        let chunks = extract_chunks(&html);
        prop_assert!(chunks.iter().all(|c| !c.contains("zzsecret")));
    }
}
