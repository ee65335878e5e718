//! Contraction expansion.
//!
//! Replaces the typographic right single quote with an apostrophe, then
//! substitutes each whitespace token found in the static contraction table
//! with its full form. Lookup is exact, so the stage belongs after
//! lowercasing in a composition.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use crate::errors::Result;
use crate::pipeline::io::{IoKind, StageIo};
use crate::pipeline::stage::Stage;

static CONTRACTIONS: Lazy<FxHashMap<&'static str, &'static str>> = Lazy::new(|| {
    let pairs: &[(&str, &str)] = &[
        ("ain't", "am not"),
        ("aren't", "are not"),
        ("can't", "can not"),
        ("could've", "could have"),
        ("couldn't", "could not"),
        ("didn't", "did not"),
        ("doesn't", "does not"),
        ("don't", "do not"),
        ("hadn't", "had not"),
        ("hasn't", "has not"),
        ("haven't", "have not"),
        ("he'd", "he would"),
        ("he'll", "he will"),
        ("he's", "he is"),
        ("how'd", "how did"),
        ("how'll", "how will"),
        ("how's", "how is"),
        ("i'd", "i would"),
        ("i'll", "i will"),
        ("i'm", "i am"),
        ("i've", "i have"),
        ("isn't", "is not"),
        ("it'd", "it would"),
        ("it'll", "it will"),
        ("it's", "it is"),
        ("let's", "let us"),
        ("mightn't", "might not"),
        ("might've", "might have"),
        ("mustn't", "must not"),
        ("must've", "must have"),
        ("needn't", "need not"),
        ("shan't", "shall not"),
        ("she'd", "she would"),
        ("she'll", "she will"),
        ("she's", "she is"),
        ("should've", "should have"),
        ("shouldn't", "should not"),
        ("that'd", "that would"),
        ("that's", "that is"),
        ("there'd", "there would"),
        ("there's", "there is"),
        ("they'd", "they would"),
        ("they'll", "they will"),
        ("they're", "they are"),
        ("they've", "they have"),
        ("wasn't", "was not"),
        ("we'd", "we would"),
        ("we'll", "we will"),
        ("we're", "we are"),
        ("we've", "we have"),
        ("weren't", "were not"),
        ("what'll", "what will"),
        ("what're", "what are"),
        ("what's", "what is"),
        ("what've", "what have"),
        ("when's", "when is"),
        ("where'd", "where did"),
        ("where's", "where is"),
        ("where've", "where have"),
        ("who'll", "who will"),
        ("who's", "who is"),
        ("who've", "who have"),
        ("why's", "why is"),
        ("won't", "will not"),
        ("would've", "would have"),
        ("wouldn't", "would not"),
        ("y'all", "you all"),
        ("you'd", "you would"),
        ("you'll", "you will"),
        ("you're", "you are"),
        ("you've", "you have"),
    ];
    pairs.iter().copied().collect()
});

/// Expands contracted word forms via static lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decontract;

impl Stage for Decontract {
    fn input_kind(&self) -> IoKind {
        IoKind::Text
    }
    fn output_kind(&self) -> IoKind {
        IoKind::Text
    }

    fn transform(&self, input: StageIo) -> Result<StageIo> {
        let text = input.expect_text("decontract")?;
        let text = text.replace('\u{2019}', "'");
        let expanded = text
            .split_whitespace()
            .map(|token| CONTRACTIONS.get(token).copied().unwrap_or(token))
            .collect::<Vec<_>>()
            .join(" ");
        Ok(StageIo::Text(expanded))
    }
}
