//! Channel-fed tab authority.
//!
//! The authority is the only context allowed to create tabs. Page contexts
//! talk to it through an [`AuthorityHandle`], the way a content script talks
//! to the extension's background worker: one message in, at most one reply
//! out. Only `OPEN_TABS` is answered; anything else is ignored.

use std::sync::Arc;

use mlo::OpenerConfig;
use mlo_protocol::{Message, OpenTabsResponse};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::creator::TabCreator;
use crate::error::{Result, RuntimeError};
use crate::scheduler::{ScheduledBatch, open_tabs};

const REQUEST_QUEUE_DEPTH: usize = 32;

struct Envelope {
	message: Message,
	reply: oneshot::Sender<Option<OpenTabsResponse>>,
}

/// Sending side of a running [`TabAuthority`].
#[derive(Clone)]
pub struct AuthorityHandle {
	tx: mpsc::Sender<Envelope>,
}

impl AuthorityHandle {
	/// Delivers `message` and waits for the acknowledgment.
	///
	/// Returns `Ok(None)` for messages the authority does not answer.
	pub async fn request(&self, message: Message) -> Result<Option<OpenTabsResponse>> {
		let (reply, response) = oneshot::channel();
		self.tx
			.send(Envelope { message, reply })
			.await
			.map_err(|_| RuntimeError::AuthorityClosed)?;
		response.await.map_err(|_| RuntimeError::AuthorityClosed)
	}

	/// Convenience for `OPEN_TABS`.
	pub async fn open_tabs(&self, urls: Vec<String>) -> Result<OpenTabsResponse> {
		self.request(Message::OpenTabs { urls })
			.await?
			.ok_or(RuntimeError::AuthorityClosed)
	}
}

/// The running worker. Joining it waits until every handle is dropped and
/// every scheduled tab has fired.
pub struct AuthorityTask {
	handle: JoinHandle<usize>,
}

impl AuthorityTask {
	/// Returns the number of tabs created over the authority's lifetime.
	pub async fn join(self) -> Result<usize> {
		self.handle.await.map_err(|_| RuntimeError::AuthorityClosed)
	}
}

pub struct TabAuthority {
	config: OpenerConfig,
	creator: Arc<dyn TabCreator>,
	rx: mpsc::Receiver<Envelope>,
	batches: Vec<ScheduledBatch>,
	created: usize,
}

impl TabAuthority {
	/// Starts the worker on the current tokio runtime.
	pub fn spawn(creator: Arc<dyn TabCreator>, config: OpenerConfig) -> (AuthorityHandle, AuthorityTask) {
		let (tx, rx) = mpsc::channel(REQUEST_QUEUE_DEPTH);
		let authority = TabAuthority {
			config,
			creator,
			rx,
			batches: Vec::new(),
			created: 0,
		};
		let handle = tokio::spawn(authority.run());
		(AuthorityHandle { tx }, AuthorityTask { handle })
	}

	async fn run(mut self) -> usize {
		while let Some(Envelope { message, reply }) = self.rx.recv().await {
			self.reap_finished().await;
			let response = self.handle(message);
			if reply.send(response).is_err() {
				debug!(target = "mlo::authority", "requester went away before the reply");
			}
		}

		for batch in self.batches.drain(..) {
			self.created += batch.finished().await;
		}
		debug!(target = "mlo::authority", created = self.created, "tab authority stopped");
		self.created
	}

	fn handle(&mut self, message: Message) -> Option<OpenTabsResponse> {
		match message {
			Message::OpenTabs { urls } => {
				let requested = urls.len();
				let batch = open_tabs(urls, &self.config, Arc::clone(&self.creator));
				let opened = batch.scheduled();
				if opened < requested {
					warn!(target = "mlo::authority", requested, opened, "dropped invalid or excess urls");
				}
				self.batches.push(batch);
				Some(OpenTabsResponse::scheduled(opened))
			}
			other => {
				debug!(target = "mlo::authority", kind = other.kind(), "ignoring message");
				None
			}
		}
	}

	async fn reap_finished(&mut self) {
		while let Some(pos) = self.batches.iter().position(ScheduledBatch::is_finished) {
			self.created += self.batches.swap_remove(pos).finished().await;
		}
	}
}
