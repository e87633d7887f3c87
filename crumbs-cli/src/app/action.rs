use crumbs_core::MenuEvent;

/// User actions that can be performed in the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// An event for the selection state machine
    Menu(MenuEvent),
    /// Show help overlay
    ShowHelp,
    /// Hide help overlay
    HideHelp,
    /// No action (unbound keys, ticks)
    Tick,
}
