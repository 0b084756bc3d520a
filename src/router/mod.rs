use anyhow::Result;
use async_trait::async_trait;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use std::sync::Arc;

use crate::entity::{NETWORKS, SLIPPAGE_OPTIONS};
use crate::presenter::{HistoryPresenter, SwapPresenter};
use crate::view::SwapView;

const HELP: &str = "Available commands:
  networks                 list supported networks
  network <id>             switch network
  testnet on|off           toggle testnet mode
  tokens                   list tokens of the current network
  reload                   reload the token list
  from <symbol|address>    select the token to sell
  to <symbol|address>      select the token to buy
  amount <value>           set the amount to sell
  slippage [percent]       show or set the slippage tolerance
  flip                     switch the two tokens
  connect [wallet]         connect a wallet
  swap                     submit the swap
  history [n|next|prev]    show the transaction history
  status                   show the swap form
  help                     show this message
  quit                     exit";

#[derive(Debug, Clone, PartialEq)]
pub enum HistoryTarget {
    Current,
    Page(usize),
    Next,
    Previous,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Networks,
    Network(String),
    Testnet(bool),
    Tokens,
    Reload,
    From(String),
    To(String),
    Amount(String),
    Slippage(Option<f64>),
    Flip,
    Connect(Option<String>),
    Swap,
    History(HistoryTarget),
    Status,
    Quit,
}

lazy_static! {
    static ref COMMAND_RE: Regex = Regex::new(r"^\s*([A-Za-z]+)(?:\s+(.+?))?\s*$").unwrap();
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    if line.trim().is_empty() {
        return Ok(None);
    }

    let captures = COMMAND_RE
        .captures(line)
        .ok_or_else(|| format!("Unrecognized input: {}", line.trim()))?;
    let name = captures[1].to_lowercase();
    let arg = captures.get(2).map(|m| m.as_str().to_string());

    let require = |arg: Option<String>| arg.ok_or_else(|| format!("Usage: {} <value>", name));

    let command = match name.as_str() {
        "help" => Command::Help,
        "networks" => Command::Networks,
        "network" => Command::Network(require(arg)?),
        "testnet" => match arg.as_deref().map(str::to_lowercase).as_deref() {
            Some("on") | Some("true") => Command::Testnet(true),
            Some("off") | Some("false") => Command::Testnet(false),
            _ => return Err("Usage: testnet on|off".to_string()),
        },
        "tokens" => Command::Tokens,
        "reload" => Command::Reload,
        "from" => Command::From(require(arg)?),
        "to" => Command::To(require(arg)?),
        "amount" => Command::Amount(require(arg)?),
        "slippage" => match arg {
            None => Command::Slippage(None),
            Some(raw) => {
                let value = raw
                    .trim_end_matches('%')
                    .parse::<f64>()
                    .map_err(|_| format!("Invalid slippage: {}", raw))?;
                Command::Slippage(Some(value))
            }
        },
        "flip" | "switch" => Command::Flip,
        "connect" => Command::Connect(arg),
        "swap" => Command::Swap,
        "history" => Command::History(match arg.as_deref() {
            None => HistoryTarget::Current,
            Some("next") => HistoryTarget::Next,
            Some("prev") | Some("previous") => HistoryTarget::Previous,
            Some(page) => HistoryTarget::Page(
                page.parse()
                    .map_err(|_| "Usage: history [page|next|prev]".to_string())?,
            ),
        }),
        "status" => Command::Status,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("Unknown command: {}. Type 'help' for a list.", other)),
    };

    Ok(Some(command))
}

#[async_trait]
pub trait Router: Send + Sync {
    /// Handles one input line. Returns `false` once the session should end.
    async fn handle_line(&self, line: &str) -> Result<bool>;
}

/// Dispatches console commands to the presenters
pub struct SessionRouter {
    swap: Arc<dyn SwapPresenter>,
    history: Arc<dyn HistoryPresenter>,
    view: Arc<dyn SwapView>,
}

impl SessionRouter {
    pub fn new(
        swap: Arc<dyn SwapPresenter>,
        history: Arc<dyn HistoryPresenter>,
        view: Arc<dyn SwapView>,
    ) -> Self {
        Self {
            swap,
            history,
            view,
        }
    }

    async fn list_networks(&self) -> Result<()> {
        let current = self.swap.snapshot().network_name;
        let lines: Vec<String> = NETWORKS
            .iter()
            .map(|network| {
                let marker = if network.name == current { "*" } else { " " };
                format!("{} {:<10} {}", marker, network.id, network.name)
            })
            .collect();
        self.view
            .notify_info(&format!("Supported networks:\n{}", lines.join("\n")))
            .await
    }
}

#[async_trait]
impl Router for SessionRouter {
    async fn handle_line(&self, line: &str) -> Result<bool> {
        let command = match parse_command(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(true),
            Err(message) => {
                self.view.notify_error(&message).await?;
                return Ok(true);
            }
        };
        debug!("Handling command {:?}", command);

        match command {
            Command::Help => self.view.notify_info(HELP).await?,
            Command::Networks => self.list_networks().await?,
            Command::Network(id) => {
                self.swap.select_network(&id).await?;
                self.swap.show_form().await?;
            }
            Command::Testnet(enabled) => {
                self.swap.set_testnet(enabled).await?;
                self.swap.show_form().await?;
            }
            Command::Tokens => self.swap.show_tokens().await?,
            Command::Reload => self.swap.reload_catalog().await?,
            Command::From(query) => {
                self.swap.select_from_token(&query).await?;
                self.swap.show_form().await?;
            }
            Command::To(query) => {
                self.swap.select_to_token(&query).await?;
                self.swap.show_form().await?;
            }
            Command::Amount(amount) => {
                self.swap.set_from_amount(&amount).await?;
                self.swap.show_form().await?;
            }
            Command::Slippage(Some(value)) => self.swap.set_slippage(value).await?,
            Command::Slippage(None) => {
                let presets: Vec<String> = SLIPPAGE_OPTIONS
                    .iter()
                    .map(|option| format!("{}%", option))
                    .collect();
                self.view
                    .notify_info(&format!(
                        "Slippage: {}% (presets: {})",
                        self.swap.snapshot().swap.slippage,
                        presets.join(", ")
                    ))
                    .await?
            }
            Command::Flip => {
                self.swap.switch_tokens().await?;
                self.swap.show_form().await?;
            }
            Command::Connect(wallet_id) => {
                self.swap.connect_wallet(wallet_id.as_deref()).await?;
            }
            Command::Swap => {
                self.swap.submit().await?;
                self.swap.show_form().await?;
            }
            Command::History(target) => match target {
                HistoryTarget::Current => self.history.show_current().await?,
                HistoryTarget::Page(page) => self.history.show_page(page).await?,
                HistoryTarget::Next => self.history.next_page().await?,
                HistoryTarget::Previous => self.history.previous_page().await?,
            },
            Command::Status => self.swap.show_form().await?,
            Command::Quit => return Ok(false),
        }

        Ok(true)
    }
}
