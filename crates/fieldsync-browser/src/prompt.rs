//! Link prompt via `window.prompt`.

use fieldsync_core::Prompt;

/// The browser's blocking modal prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowPrompt;

impl Prompt for WindowPrompt {
    fn prompt(&self, message: &str, default: &str) -> Option<String> {
        let window = web_sys::window()?;
        match window.prompt_with_message_and_default(message, default) {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!("window.prompt failed: {:?}", e);
                None
            }
        }
    }
}
