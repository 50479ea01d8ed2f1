//! Built-in profile content: names, landing markup, icons, starters.

use switchyard_commands::registry::{
    PROFILE_ASSISTANT, PROFILE_DOCUMENT_HELPER, PROFILE_WEB_SEARCH, TRIGGER_CUSTOM_PROMPTS,
};
use switchyard_core::{Profile, StarterPrompt};

const ASSISTANT_ICON: &str = "https://img.icons8.com/?size=128&id=kTuxVYRKeKEY&format=png";
const WEB_SEARCH_ICON: &str = "https://img.icons8.com/?size=100&id=BpLxiRbSRN80&format=png";
const DOCUMENT_HELPER_ICON: &str = "https://img.icons8.com/?size=100&id=85784&format=png";

/// Landing page shown when the AI Assistant profile is picked.
pub const LANDING_PAGE_HTML: &str = r#"<div class="custom-hero">
    <div class="hero-background"></div>
    <div class="hero-content">
        <div class="hero-text">
            <h1 class="hero-title">🚀 Switchyard demo</h1>
            <h2 class="hero-subtitle">Profiles, commands and guided actions in one front-end</h2>
            <h3 class="hero-description">Every profile offers a different set of features</h3>
            <div class="hero-tips">
                <p class="tip-item">💡 Tip: send <code>🎨</code> to open the custom prompt menu</p>
                <p class="tip-item">📁 Upload a file to try the Document Helper</p>
                <p class="tip-item">⚡ Switch profiles to explore each mode</p>
            </div>
        </div>
    </div>
</div>"#;

const WEB_SEARCH_DESCRIPTION: &str =
    "An assistant with web search that looks up current information.\n\n*Note: this demo does not perform real searches.*";

const DOCUMENT_HELPER_DESCRIPTION: &str =
    "An assistant for document analysis and summaries.\n\nUpload a file to try the analysis features.";

/// The three built-in profiles, in publication order. "AI Assistant" is the default.
pub fn builtin_profiles() -> Vec<Profile> {
    vec![
        Profile::new(PROFILE_ASSISTANT, LANDING_PAGE_HTML, ASSISTANT_ICON)
            .default_profile()
            .with_starter(StarterPrompt::new(
                "Open custom prompts",
                TRIGGER_CUSTOM_PROMPTS,
                Some("🎨"),
            ))
            .with_starter(StarterPrompt::new(
                "Try the summary feature",
                "Please explain this feature in detail",
                Some("📝"),
            ))
            .with_starter(StarterPrompt::new(
                "Try a detailed explanation",
                "Tell me how this front-end can be customised",
                Some("🔍"),
            )),
        Profile::new(PROFILE_WEB_SEARCH, WEB_SEARCH_DESCRIPTION, WEB_SEARCH_ICON)
            .with_starter(StarterPrompt::new(
                "Search demo",
                "Look up the latest AI technology",
                Some("🔍"),
            ))
            .with_starter(StarterPrompt::new(
                "News search",
                "What is today's tech news?",
                Some("📰"),
            )),
        Profile::new(PROFILE_DOCUMENT_HELPER, DOCUMENT_HELPER_DESCRIPTION, DOCUMENT_HELPER_ICON)
            .with_starter(StarterPrompt::new(
                "About file analysis",
                "Tell me about the file analysis feature",
                Some("📄"),
            ))
            .with_starter(StarterPrompt::new(
                "Supported formats",
                "Which file formats are supported?",
                Some("📋"),
            )),
    ]
}
