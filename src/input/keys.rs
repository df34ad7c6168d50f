//! Keyboard shortcuts available in the drawing window

/// Commands that can be triggered from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Close the window
    Quit,
    /// Show or hide the ruler grid
    ToggleRuler,
    /// Clear every path, same as a double tap while idle
    Clear,
}

impl KeyCommand {
    /// Convert a Windows virtual key code to a command
    pub fn from_vk_code(vk_code: u32) -> Option<Self> {
        match vk_code {
            0x1b => Some(KeyCommand::Quit),        // VK_ESCAPE
            0x52 => Some(KeyCommand::ToggleRuler), // R
            0x43 => Some(KeyCommand::Clear),       // C
            0x2e => Some(KeyCommand::Clear),       // VK_DELETE
            _ => None,
        }
    }
}
