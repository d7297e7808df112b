//! Preferred voice selection
//!
//! Given whatever voices the backend offers, pick the one a young
//! learner should hear. Order of preference:
//!
//! 1. an exact name match from the preferred list, in list order
//! 2. the first voice for the locale that is female
//! 3. the first voice for the locale
//! 4. the first voice of all

use super::synth::{Gender, Voice};

/// Does a backend locale tag match the wanted locale?
///
/// Case and `_`/`-` differences are ignored ("en_US" matches "en-US").
pub fn lang_matches(voice_lang: &str, wanted: &str) -> bool {
    let normalize = |s: &str| s.to_ascii_lowercase().replace('_', "-");
    normalize(voice_lang).contains(&normalize(wanted))
}

fn is_female(voice: &Voice) -> bool {
    voice.gender == Some(Gender::Female) || voice.name.to_lowercase().contains("female")
}

/// Pick the preferred voice, or `None` if there are no voices at all
pub fn preferred_voice<'a, S: AsRef<str>>(
    voices: &'a [Voice],
    preferred_names: &[S],
    lang: &str,
) -> Option<&'a Voice> {
    for name in preferred_names {
        if let Some(voice) = voices.iter().find(|v| v.name == name.as_ref()) {
            return Some(voice);
        }
    }

    voices
        .iter()
        .find(|v| lang_matches(&v.lang, lang) && is_female(v))
        .or_else(|| voices.iter().find(|v| lang_matches(&v.lang, lang)))
        .or_else(|| voices.first())
}
