//! # Product Page
//!
//! Line-oriented page over the shared product list.
//!
//! ## Page Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdin line ──► PageCommand::from_str ──► commands::product::*          │
//! │                                                    │                    │
//! │                                                    ▼                    │
//! │                                  ProductListController publishes events │
//! │                                                    │                    │
//! │  stdout ◄── render (list + editor) ◄── drain events ┘                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Commands
//! | Line             | Effect                                     |
//! |------------------|--------------------------------------------|
//! | `new`            | Start editing a blank product              |
//! | `edit <id>`      | Start editing a listed product             |
//! | `name <text>`    | Set the operating product's name           |
//! | `price <amount>` | Set the operating product's price          |
//! | `save`           | Insert or update the operating product     |
//! | `delete <id>`    | Delete a product                           |
//! | `list`           | Show the list again                        |
//! | `reload`         | Reload the list from the database          |
//! | `help`           | Show this table                            |
//! | `quit`           | Leave the page                             |

use std::io;
use std::str::FromStr;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::debug;

use crate::commands::product::{self as commands, PageDto, ProductDto};
use crate::error::ApiError;
use crate::state::ProductListState;
use shelf_core::{ProductListEvent, ProductStore};

const HELP: &str = "\
commands:
  new              start a new product
  edit <id>        edit a listed product
  name <text>      set the name
  price <amount>   set the price, e.g. 9.99
  save             save the product being edited
  delete <id>      delete a product
  list             show the list
  reload           reload the list from the database
  help             show this help
  quit             leave";

// =============================================================================
// Command Parsing
// =============================================================================

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageCommand {
    New,
    Edit(i64),
    Name(String),
    Price(String),
    Save,
    Delete(i64),
    List,
    Reload,
    Help,
    Quit,
}

impl FromStr for PageCommand {
    type Err = ApiError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "new" => PageCommand::New,
            "edit" => PageCommand::Edit(parse_id(word, rest)?),
            "name" => PageCommand::Name(rest.to_string()),
            "price" if !rest.is_empty() => PageCommand::Price(rest.to_string()),
            "price" => return Err(ApiError::validation("Usage: price <amount>")),
            "save" => PageCommand::Save,
            "delete" => PageCommand::Delete(parse_id(word, rest)?),
            "list" | "ls" => PageCommand::List,
            "reload" => PageCommand::Reload,
            "help" | "?" => PageCommand::Help,
            "quit" | "exit" => PageCommand::Quit,
            other => {
                return Err(ApiError::validation(format!(
                    "Unknown command '{}' (try 'help')",
                    other
                )))
            }
        };
        Ok(command)
    }
}

fn parse_id(word: &str, rest: &str) -> Result<i64, ApiError> {
    rest.parse::<i64>()
        .map_err(|_| ApiError::validation(format!("Usage: {} <id>", word)))
}

/// What a command prints after the page has caught up on events.
#[derive(Debug)]
enum Reply {
    Quiet,
    Line(String),
    Products(Vec<ProductDto>),
    Quit,
}

/// Whether the loop keeps reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFlow {
    Continue,
    Quit,
}

// =============================================================================
// Page
// =============================================================================

/// Text page bound to a [`ProductListState`].
///
/// Writes to any `AsyncWrite` so tests can capture the output in a `Vec<u8>`.
pub struct ProductPage<S: ProductStore, W> {
    state: ProductListState<S>,
    events: broadcast::Receiver<ProductListEvent>,
    out: W,
}

impl<S, W> ProductPage<S, W>
where
    S: ProductStore,
    ApiError: From<S::Error>,
    W: AsyncWrite + Unpin,
{
    /// Subscribes to the list's events.
    pub async fn new(state: ProductListState<S>, out: W) -> Self {
        let events = state.subscribe().await;
        ProductPage { state, events, out }
    }

    /// Reads lines until `quit` or end of input.
    pub async fn run<R>(mut self, input: R) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        self.render().await?;
        self.prompt().await?;

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            if self.handle_line(&line).await? == PageFlow::Quit {
                break;
            }
            self.prompt().await?;
        }

        self.out.flush().await
    }

    /// Runs one input line and prints whatever changed.
    pub async fn handle_line(&mut self, line: &str) -> io::Result<PageFlow> {
        if line.trim().is_empty() {
            return Ok(PageFlow::Continue);
        }

        let command = match line.parse::<PageCommand>() {
            Ok(command) => command,
            Err(e) => {
                self.print_error(&e).await?;
                return Ok(PageFlow::Continue);
            }
        };
        debug!(?command, "Page command");

        let result = self.execute(command).await;
        self.drain_events().await?;

        match result {
            Ok(Reply::Quiet) => {}
            Ok(Reply::Line(text)) => self.write_line(&text).await?,
            Ok(Reply::Products(products)) => self.write_text(&format_products(&products)).await?,
            Ok(Reply::Quit) => return Ok(PageFlow::Quit),
            Err(e) => self.print_error(&e).await?,
        }
        Ok(PageFlow::Continue)
    }

    /// Prints the list and the operating product.
    pub async fn render(&mut self) -> io::Result<()> {
        let page = commands::get_page(&self.state).await;
        self.write_text(&format_page(&page)).await
    }

    /// Gives back the writer.
    pub fn into_output(self) -> W {
        self.out
    }

    async fn execute(&self, command: PageCommand) -> Result<Reply, ApiError> {
        let state = &self.state;
        let reply = match command {
            PageCommand::New => {
                commands::select_product(state, None).await?;
                Reply::Quiet
            }
            PageCommand::Edit(id) => {
                commands::select_product(state, Some(id)).await?;
                Reply::Quiet
            }
            PageCommand::Name(name) => {
                commands::edit_operating_product(state, Some(name), None).await?;
                Reply::Quiet
            }
            PageCommand::Price(price) => {
                commands::edit_operating_product(state, None, Some(price)).await?;
                Reply::Quiet
            }
            PageCommand::Save => {
                let saved = commands::save_product(state).await?;
                Reply::Line(format!("saved #{} {} {}", saved.id, saved.name, saved.price))
            }
            PageCommand::Delete(id) => {
                if commands::delete_product(state, id).await? {
                    Reply::Line(format!("deleted #{}", id))
                } else {
                    Reply::Line(format!("no product #{}", id))
                }
            }
            PageCommand::List => Reply::Products(commands::get_products(state).await),
            PageCommand::Reload => {
                commands::reload_products(state).await?;
                Reply::Quiet
            }
            PageCommand::Help => Reply::Line(HELP.to_string()),
            PageCommand::Quit => Reply::Quit,
        };
        Ok(reply)
    }

    /// Prints the busy caption and re-renders once if anything changed.
    async fn drain_events(&mut self) -> io::Result<()> {
        let mut dirty = false;
        loop {
            match self.events.try_recv() {
                Ok(ProductListEvent::BusyChanged(true)) => {
                    let caption = self.state.lock().await.busy_text().to_string();
                    self.write_line(&caption).await?;
                }
                Ok(ProductListEvent::BusyChanged(false)) => {}
                Ok(ProductListEvent::ProductsChanged)
                | Ok(ProductListEvent::OperatingProductChanged) => dirty = true,
                Err(TryRecvError::Lagged(skipped)) => {
                    debug!(skipped, "Page fell behind on events");
                    dirty = true;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }

        if dirty {
            self.render().await?;
        }
        Ok(())
    }

    async fn prompt(&mut self) -> io::Result<()> {
        self.write_text("> ").await?;
        self.out.flush().await
    }

    async fn print_error(&mut self, err: &ApiError) -> io::Result<()> {
        let line = format!("error [{}]: {}", err.code.as_str(), err.message);
        self.write_line(&line).await
    }

    async fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.out.write_all(line.as_bytes()).await?;
        self.out.write_all(b"\n").await
    }

    async fn write_text(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes()).await
    }
}

// =============================================================================
// Rendering
// =============================================================================

fn format_page(page: &PageDto) -> String {
    let mut text = format_products(&page.products);

    let editing = &page.operating_product;
    let label = if editing.is_new {
        "new".to_string()
    } else {
        format!("#{}", editing.id)
    };
    text.push_str(&format!(
        "editing {}: name=\"{}\" price={}\n",
        label, editing.name, editing.price
    ));
    text
}

fn format_products(products: &[ProductDto]) -> String {
    let mut text = format!("products ({})\n", products.len());
    for p in products {
        text.push_str(&format!("{:>5}  {:<30} {:>10}\n", p.id, p.name, p.price));
    }
    text
}

// =============================================================================
// Unit Tests
// =============================================================================
