use crate::core::GenerationError;

pub const TOPIC_PRESETS: [&str; 3] = ["Coffee Shop", "Job Interview", "Movies"];
pub const TOPIC_FAILED: &str = "Something went wrong while contacting the AI. Please try again.";
pub const WORD_FAILED: &str = "Could not find details for this word. Please check spelling.";

pub const MIN_COUNT: u32 = 1;
pub const MAX_COUNT: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeneratorMode {
    #[default]
    Topic,
    Single,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateRequest {
    Topic { topic: String, count: u32 },
    Word { term: String },
}

/// Input state of the "Add Words" view.
#[derive(Debug, Clone)]
pub struct GeneratorForm {
    pub mode: GeneratorMode,
    pub topic: String,
    pub term: String,
    pub count: u32,
    in_flight: Option<GeneratorMode>,
    error: Option<&'static str>,
}

impl GeneratorForm {
    pub fn new(default_count: u32) -> Self {
        Self {
            mode: GeneratorMode::default(),
            topic: String::new(),
            term: String::new(),
            count: default_count.clamp(MIN_COUNT, MAX_COUNT),
            in_flight: None,
            error: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    pub fn set_mode(&mut self, mode: GeneratorMode) {
        if self.mode != mode {
            self.mode = mode;
            self.error = None;
        }
    }

    pub fn apply_preset(&mut self, preset: &str) {
        self.mode = GeneratorMode::Topic;
        self.topic = preset.to_string();
    }

    pub fn can_submit(&self) -> bool {
        !self.is_loading() && !self.active_input().trim().is_empty()
    }

    /// Blank input or a pending request yields `None`.
    pub fn submit(&mut self) -> Option<GenerateRequest> {
        if !self.can_submit() {
            return None;
        }
        let text = self.active_input().trim().to_string();
        self.error = None;
        self.in_flight = Some(self.mode);

        Some(match self.mode {
            GeneratorMode::Topic => GenerateRequest::Topic {
                topic: text,
                count: self.count.clamp(MIN_COUNT, MAX_COUNT),
            },
            GeneratorMode::Single => GenerateRequest::Word { term: text },
        })
    }

    /// Success clears the input the request came from; failure shows that mode's message.
    pub fn finish<T>(&mut self, result: &Result<T, GenerationError>) {
        let Some(mode) = self.in_flight.take() else {
            return;
        };
        match (mode, result) {
            (GeneratorMode::Topic, Ok(_)) => self.topic.clear(),
            (GeneratorMode::Single, Ok(_)) => self.term.clear(),
            (GeneratorMode::Topic, Err(_)) => self.error = Some(TOPIC_FAILED),
            (GeneratorMode::Single, Err(_)) => self.error = Some(WORD_FAILED),
        }
    }

    fn active_input(&self) -> &str {
        match self.mode {
            GeneratorMode::Topic => &self.topic,
            GeneratorMode::Single => &self.term,
        }
    }
}
