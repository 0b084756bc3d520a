/// Outcome of one submitted swap, as reported back to the form.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapResult {
    pub transaction_id: String,
    pub source_token: String,
    pub target_token: String,
    pub amount_in: String,
    pub amount_out: String,
    pub signature: Option<String>,
    pub explorer_url: Option<String>,
    pub success: bool,
    pub error_message: Option<String>,
}
