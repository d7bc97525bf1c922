//! Form state controller for the video wizard.
//!
//! A strictly linear sequence of input steps ending in the generate trigger.
//! Step indices are 1-based; the index one past the last step is the
//! "preparing" placeholder and is where advancing stops. There is no way
//! back, and no step checks that its field was filled in.

use std::path::PathBuf;

use super::video::{Font, Variant, VideoRequest, Voice, MAX_TEMPLATE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Text,
    DisplayName,
    Handle,
    FontColor,
    BackgroundColor,
    Font,
    Voice,
    Template,
    Photo,
    Generate,
}

const CLASSIC_STEPS: [Step; 10] = [
    Step::Text,
    Step::DisplayName,
    Step::Handle,
    Step::FontColor,
    Step::BackgroundColor,
    Step::Font,
    Step::Voice,
    Step::Template,
    Step::Photo,
    Step::Generate,
];

const STEPWISE_STEPS: [Step; 6] = [
    Step::Text,
    Step::DisplayName,
    Step::Handle,
    Step::Voice,
    Step::Photo,
    Step::Generate,
];

impl Step {
    /// Ordered steps for a form variant. Always ends with `Generate`.
    pub fn sequence(variant: Variant) -> &'static [Step] {
        match variant {
            Variant::Classic => &CLASSIC_STEPS,
            Variant::Stepwise => &STEPWISE_STEPS,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Step::Text => "Text",
            Step::DisplayName => "Name",
            Step::Handle => "Handle",
            Step::FontColor => "Color",
            Step::BackgroundColor => "Bg",
            Step::Font => "Font",
            Step::Voice => "Voice",
            Step::Template => "Template",
            Step::Photo => "Photo",
            Step::Generate => "Generate",
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            Step::Text => "Enter text to generate video",
            Step::DisplayName => "Profile Name",
            Step::Handle => "@Username",
            Step::FontColor => "Font Color",
            Step::BackgroundColor => "Font Bg Color",
            Step::Font => "Select Font Style",
            Step::Voice => "Select Voice Type",
            Step::Template => "Template no. (0-7)",
            Step::Photo => "Photo / logo file (leave blank for the default)",
            Step::Generate => "Generate Video",
        }
    }

    /// True for steps edited through a text buffer.
    pub fn is_text(self) -> bool {
        matches!(
            self,
            Step::Text
                | Step::DisplayName
                | Step::Handle
                | Step::FontColor
                | Step::BackgroundColor
                | Step::Photo
        )
    }
}

/// The one input widget a step presents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputWidget {
    TextArea { max: usize },
    TextLine,
    Select { options: Vec<&'static str> },
    Number { min: u8, max: u8 },
    FilePath,
    GenerateButton,
    Preparing,
}

impl InputWidget {
    pub fn for_step(step: Option<Step>, variant: Variant) -> Self {
        match step {
            Some(Step::Text) => InputWidget::TextArea {
                max: variant.max_text_len(),
            },
            Some(Step::DisplayName | Step::Handle | Step::FontColor | Step::BackgroundColor) => {
                InputWidget::TextLine
            }
            Some(Step::Font) => InputWidget::Select {
                options: Font::ALL.iter().map(|f| f.id()).collect(),
            },
            Some(Step::Voice) => InputWidget::Select {
                options: Voice::ALL.iter().map(|v| v.label()).collect(),
            },
            Some(Step::Template) => InputWidget::Number {
                min: 0,
                max: MAX_TEMPLATE,
            },
            Some(Step::Photo) => InputWidget::FilePath,
            Some(Step::Generate) => InputWidget::GenerateButton,
            None => InputWidget::Preparing,
        }
    }
}

/// Truncate to at most `max` characters, never splitting a character.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Wizard position plus every field collected so far.
#[derive(Debug, Clone)]
pub struct WizardState {
    step: usize,
    request: VideoRequest,
    photo_path: String,
}

impl WizardState {
    pub fn new(variant: Variant) -> Self {
        Self {
            step: 1,
            request: VideoRequest::new(variant),
            photo_path: String::new(),
        }
    }

    pub fn variant(&self) -> Variant {
        self.request.variant
    }

    pub fn steps(&self) -> &'static [Step] {
        Step::sequence(self.variant())
    }

    /// Number of defined steps, the trigger included.
    pub fn step_count(&self) -> usize {
        self.steps().len()
    }

    /// Current 1-based index, `1..=step_count() + 1`.
    pub fn step_index(&self) -> usize {
        self.step
    }

    pub fn step_at(&self, index: usize) -> Option<Step> {
        index
            .checked_sub(1)
            .and_then(|i| self.steps().get(i))
            .copied()
    }

    /// `None` once past the trigger.
    pub fn current_step(&self) -> Option<Step> {
        self.step_at(self.step)
    }

    pub fn widget(&self) -> InputWidget {
        InputWidget::for_step(self.current_step(), self.variant())
    }

    pub fn widget_at(&self, index: usize) -> InputWidget {
        InputWidget::for_step(self.step_at(index), self.variant())
    }

    pub fn on_trigger(&self) -> bool {
        self.current_step() == Some(Step::Generate)
    }

    pub fn is_preparing(&self) -> bool {
        self.current_step().is_none()
    }

    /// Move forward exactly one step. Saturates at the preparing placeholder.
    pub fn advance(&mut self) -> Option<Step> {
        if self.step <= self.step_count() {
            self.step += 1;
        }
        log::debug!("Wizard advanced to step {}", self.step);
        self.current_step()
    }

    // ── Field access ────────────────────────────────────────────────────

    pub fn request(&self) -> &VideoRequest {
        &self.request
    }

    pub fn text_limit(&self, step: Step) -> Option<usize> {
        match step {
            Step::Text => Some(self.variant().max_text_len()),
            _ => None,
        }
    }

    /// Current value of a text-edited step.
    pub fn text_value(&self, step: Step) -> &str {
        match step {
            Step::Text => &self.request.text,
            Step::DisplayName => &self.request.display_name,
            Step::Handle => &self.request.handle,
            Step::FontColor => &self.request.styling.font_color,
            Step::BackgroundColor => &self.request.styling.background_color,
            Step::Photo => &self.photo_path,
            _ => "",
        }
    }

    /// Replace a text-edited step's value, truncating to the step's limit.
    pub fn set_text_value(&mut self, step: Step, value: &str) {
        let value = match self.text_limit(step) {
            Some(max) => truncate_chars(value, max),
            None => value,
        }
        .to_string();

        match step {
            Step::Text => self.request.text = value,
            Step::DisplayName => self.request.display_name = value,
            Step::Handle => self.request.handle = value,
            Step::FontColor => self.request.styling.font_color = value,
            Step::BackgroundColor => self.request.styling.background_color = value,
            Step::Photo => self.photo_path = value,
            other => log::warn!("Ignoring text input for non-text step {other:?}"),
        }
    }

    pub fn font(&self) -> Option<Font> {
        self.request.styling.font
    }

    pub fn voice(&self) -> Option<Voice> {
        self.request.voice
    }

    pub fn template(&self) -> u8 {
        self.request.template.unwrap_or(0)
    }

    pub fn cycle_font(&mut self, forward: bool) {
        self.request.styling.font = cycle(&Font::ALL, self.request.styling.font, forward);
    }

    pub fn cycle_voice(&mut self, forward: bool) {
        self.request.voice = cycle(&Voice::ALL, self.request.voice, forward);
    }

    /// Set the preset background, clamped to the known range.
    pub fn set_template(&mut self, template: u8) {
        self.request.template = Some(template.min(MAX_TEMPLATE));
    }

    /// Photo path as typed, `None` when blank.
    pub fn photo_path(&self) -> Option<PathBuf> {
        let trimmed = self.photo_path.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(PathBuf::from(trimmed))
        }
    }

    /// Snapshot for one submission. The photo is read later, off the UI loop.
    pub fn build_request(&self) -> (VideoRequest, Option<PathBuf>) {
        (self.request.clone(), self.photo_path())
    }
}

/// Step through `options`, with "nothing selected" sitting before the first.
fn cycle<T: Copy + PartialEq>(options: &[T], current: Option<T>, forward: bool) -> Option<T> {
    let pos = current.and_then(|c| options.iter().position(|o| *o == c));
    let len = options.len();
    let next = match (pos, forward) {
        (None, true) => Some(0),
        (None, false) => Some(len - 1),
        (Some(i), true) if i + 1 < len => Some(i + 1),
        (Some(_), true) => None,
        (Some(0), false) => None,
        (Some(i), false) => Some(i - 1),
    };
    next.map(|i| options[i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(Variant::Classic)]
    #[case(Variant::Stepwise)]
    fn test_every_in_range_step_has_one_widget(#[case] variant: Variant) {
        let wizard = WizardState::new(variant);
        for index in 1..=wizard.step_count() {
            let widget = wizard.widget_at(index);
            assert_ne!(widget, InputWidget::Preparing, "step {index}");
        }
        assert_eq!(
            wizard.widget_at(wizard.step_count()),
            InputWidget::GenerateButton
        );
        assert_eq!(wizard.widget_at(wizard.step_count() + 1), InputWidget::Preparing);
        assert_eq!(wizard.widget_at(0), InputWidget::Preparing);
    }

    #[rstest]
    #[case(Variant::Classic)]
    #[case(Variant::Stepwise)]
    fn test_advance_visits_each_step_in_order(#[case] variant: Variant) {
        let mut wizard = WizardState::new(variant);
        let mut visited = vec![wizard.current_step().unwrap()];
        while let Some(step) = wizard.advance() {
            visited.push(step);
        }
        assert_eq!(visited, Step::sequence(variant));
        assert!(wizard.is_preparing());
    }

    #[test]
    fn test_last_input_step_advances_to_trigger() {
        let mut wizard = WizardState::new(Variant::Stepwise);
        for _ in 1..wizard.step_count() - 1 {
            wizard.advance();
        }
        assert_eq!(wizard.current_step(), Some(Step::Photo));
        assert_eq!(wizard.advance(), Some(Step::Generate));
        assert!(wizard.on_trigger());
    }

    #[test]
    fn test_advance_saturates_past_trigger() {
        let mut wizard = WizardState::new(Variant::Stepwise);
        for _ in 0..20 {
            wizard.advance();
        }
        assert_eq!(wizard.step_index(), wizard.step_count() + 1);
        assert_eq!(wizard.widget(), InputWidget::Preparing);
    }

    #[test]
    fn test_blank_fields_advance() {
        let mut wizard = WizardState::new(Variant::Classic);
        assert_eq!(wizard.advance(), Some(Step::DisplayName));
        assert!(wizard.request().text.is_empty());
    }

    #[test]
    fn test_text_is_truncated_at_boundary() {
        let mut wizard = WizardState::new(Variant::Classic);
        wizard.set_text_value(Step::Text, &"a".repeat(300));
        assert_eq!(wizard.request().text.chars().count(), 256);

        let mut wizard = WizardState::new(Variant::Stepwise);
        wizard.set_text_value(Step::Text, &"é".repeat(600));
        assert_eq!(wizard.request().text.chars().count(), 512);
    }

    #[test]
    fn test_other_text_fields_are_unbounded() {
        let mut wizard = WizardState::new(Variant::Classic);
        let long = "n".repeat(1000);
        wizard.set_text_value(Step::DisplayName, &long);
        assert_eq!(wizard.text_value(Step::DisplayName), long);
    }

    #[test]
    fn test_cycle_voice_wraps_through_none() {
        let mut wizard = WizardState::new(Variant::Stepwise);
        assert_eq!(wizard.voice(), None);
        wizard.cycle_voice(true);
        assert_eq!(wizard.voice(), Some(Voice::Alloy));
        wizard.cycle_voice(false);
        assert_eq!(wizard.voice(), None);
        wizard.cycle_voice(false);
        assert_eq!(wizard.voice(), Some(Voice::Shimmer));
        wizard.cycle_voice(true);
        assert_eq!(wizard.voice(), None);
    }

    #[test]
    fn test_cycle_font() {
        let mut wizard = WizardState::new(Variant::Classic);
        wizard.cycle_font(true);
        wizard.cycle_font(true);
        assert_eq!(wizard.font(), Some(Font::TimesBoldItalic));
    }

    #[test]
    fn test_template_is_clamped() {
        let mut wizard = WizardState::new(Variant::Classic);
        assert_eq!(wizard.template(), 0);
        wizard.set_template(42);
        assert_eq!(wizard.template(), MAX_TEMPLATE);
    }

    #[test]
    fn test_photo_path_blank_means_default() {
        let mut wizard = WizardState::new(Variant::Classic);
        wizard.set_text_value(Step::Photo, "   ");
        assert!(wizard.build_request().1.is_none());
        wizard.set_text_value(Step::Photo, " /tmp/me.png ");
        assert_eq!(wizard.build_request().1, Some(PathBuf::from("/tmp/me.png")));
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("hi", 5), "hi");
        assert_eq!(truncate_chars("", 0), "");
    }

    proptest! {
        #[test]
        fn prop_text_never_exceeds_limit(input in "\\PC{0,700}") {
            for variant in [Variant::Classic, Variant::Stepwise] {
                let mut wizard = WizardState::new(variant);
                wizard.set_text_value(Step::Text, &input);
                let stored = &wizard.request().text;
                prop_assert!(stored.chars().count() <= variant.max_text_len());
                prop_assert!(input.starts_with(stored.as_str()));
            }
        }
    }
}
