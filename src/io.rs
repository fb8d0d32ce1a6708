use crate::denomination::{Denomination, DenominationSet};
use crate::error::InputError;
use crate::transaction::WithdrawalRequest;
use anyhow::Context;
use futures::ready;
use futures::Stream;
use futures::TryStreamExt;
use std::fmt;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::task::Poll;
use tokio::io::{AsyncBufRead, BufReader};
use tokio::runtime::Runtime;
use tracing::debug;

/// Everything the input describes: the opening stock and the queue of
/// customers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Smallest denomination first.
    pub initial_counts: Vec<u64>,
    pub requests: Vec<WithdrawalRequest>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// No path, or `-`, reads standard input.
    pub fn from_arg(path: Option<&Path>) -> Self {
        match path {
            Some(p) if p != Path::new("-") => InputSource::File(p.to_path_buf()),
            _ => InputSource::Stdin,
        }
    }
}

// Splits the input on ASCII whitespace. A token may span several buffer fills.
fn token_stream<R: AsyncBufRead + Unpin>(
    mut reader: R,
) -> impl Stream<Item = std::io::Result<String>> {
    let mut pending: Vec<u8> = vec![];
    futures::stream::poll_fn(move |cx| loop {
        let buf = match ready!(Pin::new(&mut reader).poll_fill_buf(cx)) {
            Ok(b) => b,
            Err(e) => return Poll::Ready(Some(Err(e))),
        };
        if buf.is_empty() {
            if pending.is_empty() {
                return Poll::Ready(None);
            }
            return Poll::Ready(Some(decode_token(std::mem::take(&mut pending))));
        }

        let mut consumed = 0;
        let mut complete = None;
        for &byte in buf {
            consumed += 1;
            if byte.is_ascii_whitespace() {
                if !pending.is_empty() {
                    complete = Some(std::mem::take(&mut pending));
                    break;
                }
            } else {
                pending.push(byte);
            }
        }
        Pin::new(&mut reader).consume(consumed);

        if let Some(token) = complete {
            return Poll::Ready(Some(decode_token(token)));
        }
    })
}

fn decode_token(bytes: Vec<u8>) -> std::io::Result<String> {
    String::from_utf8(bytes)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

/// What a token is expected to hold. Only rendered when it fails to parse.
#[derive(Debug, Copy, Clone)]
enum Field {
    Count(Denomination),
    Customers,
    Amount(usize),
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Count(denomination) => write!(f, "count of denomination {denomination}"),
            Field::Customers => f.write_str("number of customers"),
            Field::Amount(customer) => write!(f, "amount of customer {}", customer + 1),
        }
    }
}

async fn next_number<S>(tokens: &mut S, field: Field) -> Result<u64, InputError>
where
    S: Stream<Item = std::io::Result<String>> + Unpin,
{
    let Some(token) = tokens.try_next().await? else {
        return Err(InputError::UnexpectedEof {
            field: field.to_string(),
        });
    };
    token.parse::<u64>().map_err(|_| InputError::InvalidNumber {
        field: field.to_string(),
        token,
    })
}

/// Reads one run: a count per denomination (smallest first), the number of
/// customers, then each customer's amount. Anything after that is ignored.
pub async fn read_session<R>(reader: R, set: &DenominationSet) -> Result<Session, InputError>
where
    R: AsyncBufRead + Unpin,
{
    let mut tokens = token_stream(reader);

    let mut initial_counts = Vec::with_capacity(set.len());
    for denomination in set.ascending() {
        let count = next_number(&mut tokens, Field::Count(denomination)).await?;
        initial_counts.push(count);
    }

    let customers = next_number(&mut tokens, Field::Customers).await?;
    let mut requests = vec![];
    for customer in 0..customers as usize {
        let amount = next_number(&mut tokens, Field::Amount(customer)).await?;
        requests.push(WithdrawalRequest { customer, amount });
    }

    let mut trailing = 0usize;
    while tokens.try_next().await?.is_some() {
        trailing += 1;
    }
    if trailing > 0 {
        debug!(trailing, "ignoring tokens after the last customer");
    }

    Ok(Session {
        initial_counts,
        requests,
    })
}

/// Drives the async decoder on a current-thread runtime; the simulation
/// itself never leaves the calling thread.
pub struct InputReader {
    rt: Runtime,
}

impl InputReader {
    pub fn new() -> anyhow::Result<Self> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to create tokio runtime")?;
        Ok(Self { rt })
    }

    pub fn consume(&self, source: &InputSource, set: &DenominationSet) -> anyhow::Result<Session> {
        self.rt.block_on(async {
            let session = match source {
                InputSource::Stdin => {
                    debug!("reading standard input");
                    read_session(BufReader::new(tokio::io::stdin()), set).await?
                }
                InputSource::File(path) => {
                    debug!(path = %path.display(), "reading input file");
                    let file = tokio::fs::File::open(path)
                        .await
                        .with_context(|| format!("failed to open {}", path.display()))?;
                    read_session(BufReader::new(file), set).await?
                }
            };
            Ok::<Session, anyhow::Error>(session)
        })
    }

    pub fn shutdown(self) {
        self.rt.shutdown_background();
    }
}
