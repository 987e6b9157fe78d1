//! Shared UI icons and emojis.
//!
//! Common emoji constants used across the terminal presenter for consistent
//! visual styling, with plain-text fallbacks for dumb terminals.

use console::Emoji;

// Status indicators
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK]");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "[ERR]");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[i]");
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "*");

// Job indicators
pub static CLAPPER: Emoji<'_, '_> = Emoji("🎬 ", "[V]");
pub static SPEAKER: Emoji<'_, '_> = Emoji("🔊 ", "[A]");
pub static PENCIL: Emoji<'_, '_> = Emoji("📝 ", "[E]");
pub static LINK: Emoji<'_, '_> = Emoji("🔗 ", "[L]");
