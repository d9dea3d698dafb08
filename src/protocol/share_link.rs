//! Share links: a whole quiz packed into a URL query string.
//!
//! Each question travels as a positional `[text, options, correctAnswerIndex]`
//! tuple with its id dropped. The JSON array is Base64-encoded over its UTF-8
//! bytes and stored in the `q` parameter; an optional label goes in `slug`.
//! The layout is positional, so the tuple order must never change or existing
//! links stop decoding.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, Engine, GeneralPurpose, GeneralPurposeConfig};
use serde_json::{json, Value};
use url::Url;

use crate::models::{Question, NUM_OPTIONS};

/// Query parameter carrying the encoded questions.
pub const QUESTIONS_PARAM: &str = "q";

/// Query parameter carrying the optional quiz label.
pub const SLUG_PARAM: &str = "slug";

/// Standard alphabet, padded on encode, padding optional on decode.
const TOKEN_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

type CompactQuestion = (String, [String; NUM_OPTIONS], usize);

/// A quiz recovered from a share link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedQuiz {
    pub questions: Vec<Question>,
    pub slug: Option<String>,
}

/// Encode the questions into the `q` token.
pub fn encode_token(questions: &[Question]) -> String {
    let compact: Vec<Value> = questions
        .iter()
        .map(|q| json!([q.text, q.options, q.correct_answer]))
        .collect();
    let json = Value::Array(compact).to_string();
    let token = TOKEN_ENGINE.encode(json.as_bytes());

    tracing::debug!(
        questions = questions.len(),
        json_bytes = json.len(),
        token_bytes = token.len(),
        "encoded share token"
    );
    token
}

/// Decode a `q` token back into questions with fresh ids.
///
/// Returns `None` when the token is not Base64, not UTF-8, not JSON, or not a
/// JSON array. Array entries that are not `[string, [4 strings], index]` with
/// an in-range index are skipped.
pub fn decode_token(token: &str) -> Option<Vec<Question>> {
    // Whitespace is ignored, matching how browsers decode Base64.
    let cleaned: String = token.chars().filter(|c| !c.is_ascii_whitespace()).collect();

    let bytes = match TOKEN_ENGINE.decode(cleaned.as_bytes()) {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(error = %err, "share token is not valid base64");
            return None;
        }
    };

    let json = match String::from_utf8(bytes) {
        Ok(json) => json,
        Err(err) => {
            tracing::warn!(error = %err, "share token is not valid utf-8");
            return None;
        }
    };

    let value: Value = match serde_json::from_str(&json) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(error = %err, "share token is not valid json");
            return None;
        }
    };

    let Value::Array(items) = value else {
        tracing::warn!("share token payload is not a list");
        return None;
    };

    let questions: Vec<Question> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| decode_entry(index, item))
        .collect();

    tracing::debug!(questions = questions.len(), "decoded share token");
    Some(questions)
}

fn decode_entry(index: usize, item: Value) -> Option<Question> {
    let (text, options, correct_answer) = match serde_json::from_value::<CompactQuestion>(item) {
        Ok(entry) => entry,
        Err(err) => {
            tracing::warn!(index, error = %err, "skipping malformed shared question");
            return None;
        }
    };

    match Question::new(text, options, correct_answer) {
        Ok(question) => Some(question),
        Err(err) => {
            tracing::warn!(index, error = %err, "skipping malformed shared question");
            None
        }
    }
}

/// Build a share URL on top of `base`.
///
/// Only the origin and path of `base` are kept. A blank label is omitted;
/// otherwise it is trimmed and stored as `slug`.
pub fn encode(questions: &[Question], label: Option<&str>, base: &Url) -> Url {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);

    let token = encode_token(questions);
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair(QUESTIONS_PARAM, &token);
        if let Some(slug) = label.map(str::trim).filter(|slug| !slug.is_empty()) {
            pairs.append_pair(SLUG_PARAM, slug);
        }
    }

    url
}

/// Read a shared quiz out of `url`.
///
/// `None` means "no shared quiz here": either there is no `q` parameter or
/// its value could not be decoded. Decoding never fails loudly.
pub fn decode(url: &Url) -> Option<SharedQuiz> {
    let mut token = None;
    let mut slug = None;

    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            QUESTIONS_PARAM if token.is_none() => token = Some(value.into_owned()),
            SLUG_PARAM if slug.is_none() => slug = Some(value.into_owned()),
            _ => {}
        }
    }

    let token = token.filter(|token| !token.is_empty())?;
    let questions = decode_token(&token)?;

    Some(SharedQuiz {
        questions,
        slug: slug.filter(|slug| !slug.is_empty()),
    })
}

/// Like [`decode`], for a URL that has not been parsed yet.
pub fn decode_str(url: &str) -> Option<SharedQuiz> {
    match Url::parse(url) {
        Ok(url) => decode(&url),
        Err(err) => {
            tracing::warn!(error = %err, "share link is not a valid url");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    fn base() -> Url {
        Url::parse("https://quiz.example.com/app/").unwrap()
    }

    fn question(text: &str, options: [&str; 4], correct: usize) -> Question {
        Question::new(text, options.map(String::from), correct).unwrap()
    }

    fn url_with_token(token: &str) -> Url {
        let mut url = base();
        url.query_pairs_mut().append_pair(QUESTIONS_PARAM, token);
        url
    }

    #[test]
    fn test_encode_single_question_with_slug() {
        let q = question("2+2?", ["3", "4", "5", "6"], 1);
        let url = encode(std::slice::from_ref(&q), Some("math"), &base());

        assert!(url.as_str().contains("slug=math"));
        assert_eq!(
            url.as_str(),
            "https://quiz.example.com/app/?q=W1siMisyPyIsWyIzIiwiNCIsIjUiLCI2Il0sMV1d&slug=math"
        );

        let shared = decode(&url).unwrap();
        assert_eq!(shared.slug.as_deref(), Some("math"));
        assert_eq!(shared.questions.len(), 1);
        assert_eq!(shared.questions[0].text, "2+2?");
        assert_eq!(shared.questions[0].options, q.options);
        assert_eq!(shared.questions[0].correct_answer, 1);
    }

    #[test]
    fn test_token_uses_positional_tuples_without_ids() {
        let q = question("2+2?", ["3", "4", "5", "6"], 1);
        let token = encode_token(&[q.clone()]);
        let json = String::from_utf8(TOKEN_ENGINE.decode(token).unwrap()).unwrap();

        assert_eq!(json, r#"[["2+2?",["3","4","5","6"],1]]"#);
        assert!(!json.contains(&q.id.to_string()));
    }

    #[test]
    fn test_non_ascii_text_survives() {
        let q = question(
            "ما عاصمة مصر؟",
            ["القاهرة", "الإسكندرية", "أسوان", "الأقصر"],
            0,
        );
        let url = encode(std::slice::from_ref(&q), None, &base());

        // '/' in the Base64 token must be escaped inside the query value.
        assert!(url.as_str().contains("%2F"));

        let shared = decode(&url).unwrap();
        assert_eq!(shared.questions[0].text, q.text);
        assert_eq!(shared.questions[0].options, q.options);
        assert_eq!(shared.slug, None);
    }

    #[test]
    fn test_decode_token_from_existing_link() {
        let token = "W1si2YXYpyDYudin2LXZhdipINmF2LXYsdifIixbItin2YTZgtin2YfYsdipIiwi2KfZhNil2LPZg9mG2K/YsdmK2KkiLCLYo9iz2YjYp9mGIiwi2KfZhNij2YLYtdixIl0sMF1d";
        let questions = decode_token(token).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].options[0], "القاهرة");
        assert_eq!(questions[0].correct_answer, 0);
    }

    #[test]
    fn test_decoding_twice_yields_disjoint_ids() {
        let questions = vec![
            question("a?", ["1", "2", "3", "4"], 0),
            question("b?", ["1", "2", "3", "4"], 3),
        ];
        let url = encode(&questions, None, &base());

        let first = decode(&url).unwrap();
        let second = decode(&url).unwrap();

        let first_ids: HashSet<_> = first.questions.iter().map(|q| q.id).collect();
        let second_ids: HashSet<_> = second.questions.iter().map(|q| q.id).collect();
        let original_ids: HashSet<_> = questions.iter().map(|q| q.id).collect();

        assert!(first_ids.is_disjoint(&second_ids));
        assert!(first_ids.is_disjoint(&original_ids));
    }

    #[test]
    fn test_decode_without_q_is_absent() {
        let url = Url::parse("https://quiz.example.com/app/?slug=math").unwrap();
        assert_eq!(decode(&url), None);
        assert_eq!(decode(&base()), None);
    }

    #[test]
    fn test_decode_empty_q_is_absent() {
        assert_eq!(decode(&url_with_token("")), None);
    }

    #[test]
    fn test_decode_corrupt_token_is_absent() {
        assert_eq!(decode(&url_with_token("not base64 at all!!")), None);
        // Valid Base64 of truncated JSON.
        let truncated = TOKEN_ENGINE.encode(r#"[["2+2?",["3""#);
        assert_eq!(decode(&url_with_token(&truncated)), None);
        // Valid Base64 of bytes that are not UTF-8.
        let binary = TOKEN_ENGINE.encode([0xffu8, 0xfe, 0xfd]);
        assert_eq!(decode(&url_with_token(&binary)), None);
    }

    #[test]
    fn test_decode_non_list_payload_is_absent() {
        let token = TOKEN_ENGINE.encode(r#"{"text":"2+2?"}"#);
        assert_eq!(decode(&url_with_token(&token)), None);
    }

    #[test]
    fn test_decode_skips_malformed_entries() {
        let token = TOKEN_ENGINE.encode(
            r#"[["ok?",["a","b","c","d"],2],["three options",["a","b","c"],0],["bad index",["a","b","c","d"],9],42]"#,
        );
        let shared = decode(&url_with_token(&token)).unwrap();
        assert_eq!(shared.questions.len(), 1);
        assert_eq!(shared.questions[0].text, "ok?");
    }

    #[test]
    fn test_decode_accepts_missing_padding_and_whitespace() {
        let token = encode_token(&[question("x", ["a", "b", "c", "d"], 0)]);
        let mangled = format!(" {} ", token.trim_end_matches('='));
        assert_eq!(decode_token(&mangled).unwrap()[0].text, "x");
    }

    #[test]
    fn test_encode_drops_base_query_and_fragment() {
        let base = Url::parse("https://quiz.example.com/app/?q=old&slug=old#top").unwrap();
        let url = encode(&[question("x", ["a", "b", "c", "d"], 0)], None, &base);
        assert_eq!(url.fragment(), None);
        assert_eq!(url.query_pairs().count(), 1);
    }

    #[test]
    fn test_blank_label_is_omitted_and_label_is_trimmed() {
        let questions = [question("x", ["a", "b", "c", "d"], 0)];
        assert!(!encode(&questions, Some("   "), &base()).as_str().contains("slug"));

        let url = encode(&questions, Some("  physics 101 "), &base());
        assert!(url.as_str().ends_with("slug=physics+101"));
        assert_eq!(decode(&url).unwrap().slug.as_deref(), Some("physics 101"));
    }

    #[test]
    fn test_decode_str_rejects_invalid_url() {
        assert_eq!(decode_str("not a url"), None);
    }

    fn arb_question() -> impl Strategy<Value = Question> {
        (
            any::<String>(),
            proptest::array::uniform4(any::<String>()),
            0..NUM_OPTIONS,
        )
            .prop_map(|(text, options, correct)| Question::new(text, options, correct).unwrap())
    }

    proptest! {
        #[test]
        fn prop_round_trip_preserves_content(
            questions in proptest::collection::vec(arb_question(), 1..12),
            label in proptest::option::of("[a-z0-9-]{1,12}"),
        ) {
            let url = encode(&questions, label.as_deref(), &base());
            let shared = decode(&url).unwrap();

            prop_assert_eq!(shared.questions.len(), questions.len());
            for (decoded, original) in shared.questions.iter().zip(&questions) {
                prop_assert_eq!(&decoded.text, &original.text);
                prop_assert_eq!(&decoded.options, &original.options);
                prop_assert_eq!(decoded.correct_answer, original.correct_answer);
            }
            prop_assert_eq!(shared.slug, label);
        }
    }
}
