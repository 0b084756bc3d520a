use crate::entity::{NetworkMode, SwapState};

/// Phase of the swap form.
///
/// `Idle -> Quoting -> (Ready | Unsupported) -> Swapping -> (SettledSuccess | SettledFailed) -> Idle`
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub enum FormPhase {
    #[default]
    Idle,
    Quoting,
    Ready,
    Unsupported,
    Swapping,
    SettledSuccess,
    SettledFailed,
}

impl FormPhase {
    pub fn is_swapping(self) -> bool {
        self == Self::Swapping
    }

    pub fn is_settled(self) -> bool {
        matches!(self, Self::SettledSuccess | Self::SettledFailed)
    }
}

/// Read-only copy of everything the form displays.
#[derive(Clone, Debug, PartialEq)]
pub struct FormSnapshot {
    pub network_name: String,
    pub mode: NetworkMode,
    pub swap: SwapState,
    pub phase: FormPhase,
    pub is_pair_supported: bool,
    pub is_loading_tokens: bool,
    pub is_connected: bool,
    pub wallet_address: Option<String>,
    pub token_count: usize,
}

impl FormSnapshot {
    /// Submit is disabled while inputs are incomplete or a swap is in flight
    pub fn can_submit(&self) -> bool {
        self.swap.is_complete() && !self.phase.is_swapping()
    }

    pub fn button_label(&self) -> &'static str {
        if !self.is_connected {
            "Connect Wallet"
        } else if self.phase.is_swapping() {
            "Swapping..."
        } else if self.phase == FormPhase::SettledSuccess {
            "Swap Successful"
        } else {
            "Swap"
        }
    }

    pub fn show_unsupported_banner(&self) -> bool {
        !self.is_pair_supported && self.swap.has_pair()
    }
}
