//! Pronunciation playback through the platform speech engine.
//!
//! The engine comes from the `tts` crate and is only linked with the `speech` feature.
//! Without it every `Speaker` reports itself unavailable and `speak` only logs.

use tracing::{
    debug,
    warn,
};

const LANGUAGE_NAMES: &[(&str, &str)] = &[
    ("english", "en"),
    ("japanese", "ja"),
    ("korean", "ko"),
    ("chinese", "zh"),
    ("mandarin", "zh"),
    ("spanish", "es"),
    ("french", "fr"),
    ("german", "de"),
    ("italian", "it"),
    ("portuguese", "pt"),
    ("russian", "ru"),
];

/// Primary language subtag for a study language given by name ("English") or tag ("en-US").
pub fn language_code(study_language: &str) -> Option<String> {
    let value = study_language.trim().to_lowercase();
    if let Some((_, code)) = LANGUAGE_NAMES.iter().find(|(name, _)| value.starts_with(name)) {
        return Some(code.to_string());
    }

    let primary = value.split(['-', '_']).next()?;
    let is_tag =
        (2..=3).contains(&primary.len()) && primary.chars().all(|c| c.is_ascii_lowercase());
    is_tag.then(|| primary.to_string())
}

/// Whether a voice tagged `voice_tag` (e.g. "en-GB") speaks `code`.
pub fn voice_matches(code: &str, voice_tag: &str) -> bool {
    voice_tag.split(['-', '_']).next().is_some_and(|primary| primary.eq_ignore_ascii_case(code))
}

pub struct Speaker {
    language: Option<String>,
    #[cfg(feature = "speech")]
    engine: Option<tts::Tts>,
}

impl Speaker {
    pub fn new(study_language: &str) -> Self {
        let language = language_code(study_language);
        match &language {
            Some(code) => debug!(study_language, language = %code, "speech language resolved"),
            None => warn!(study_language, "no speech language known for study language"),
        }

        #[cfg(feature = "speech")]
        let engine = match tts::Tts::default() {
            Ok(mut engine) => {
                if let Some(code) = &language {
                    select_voice(&mut engine, code);
                }
                Some(engine)
            }
            Err(e) => {
                warn!(error = %e, "speech engine unavailable");
                None
            }
        };

        Self {
            language,
            #[cfg(feature = "speech")]
            engine,
        }
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn is_available(&self) -> bool {
        #[cfg(feature = "speech")]
        {
            self.engine.is_some()
        }
        #[cfg(not(feature = "speech"))]
        {
            false
        }
    }

    /// Speaks `text`, interrupting anything still playing.
    pub fn speak(&mut self, text: &str) {
        #[cfg(feature = "speech")]
        {
            if let Some(engine) = self.engine.as_mut() {
                match engine.speak(text, true) {
                    Ok(_) => debug!(text, language = ?self.language, "speaking"),
                    Err(e) => warn!(error = %e, text, "speech playback failed"),
                }
                return;
            }
        }
        warn!(text, "speech playback is not available");
    }
}

#[cfg(feature = "speech")]
fn select_voice(engine: &mut tts::Tts, code: &str) {
    if !engine.supported_features().voice {
        debug!("speech engine cannot switch voices, using the system default");
        return;
    }
    let voices = match engine.voices() {
        Ok(voices) => voices,
        Err(e) => {
            warn!(error = %e, "could not list speech voices");
            return;
        }
    };

    match voices.iter().find(|voice| voice_matches(code, &voice.language().to_string())) {
        Some(voice) => match engine.set_voice(voice) {
            Ok(()) => debug!(voice = %voice.name(), language = code, "speech voice selected"),
            Err(e) => warn!(error = %e, "could not select speech voice"),
        },
        None => warn!(language = code, "no installed voice for the study language"),
    }
}
