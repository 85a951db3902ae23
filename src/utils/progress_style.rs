use indicatif::ProgressStyle;

const ONLY_MESSAGE_TEMPLATE: &str = "{spinner} {wide_msg}";
const DONE_TEMPLATE: &str = "✅ {wide_msg}";

pub struct ProgressStyleTemplate;

impl ProgressStyleTemplate {
    pub fn only_message() -> ProgressStyle {
        ProgressStyle::with_template(ONLY_MESSAGE_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    pub fn done() -> ProgressStyle {
        ProgressStyle::with_template(DONE_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}
