use crate::consts::DEFAULT_MAX_UNDO_HISTORY_LEN;
use crate::document::Document;
use crate::operation::DocumentOperation;
use crate::DocumentError;

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// An operation that was applied to the document, together with the operation that reverts it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionStep {
	pub forward: DocumentOperation,
	pub inverse: DocumentOperation,
}

/// A labelled group of steps that is undone and redone as a single unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
	pub label: String,
	pub steps: Vec<TransactionStep>,
}

impl Transaction {
	fn new(label: String) -> Self {
		Self { label, steps: Vec::new() }
	}

	/// Applies every inverse, last step first. If one fails, the steps already reverted are reapplied so the document is left as it was.
	fn revert(&self, document: &mut Document) -> Result<(), DocumentError> {
		for (reverted, step) in self.steps.iter().rev().enumerate() {
			if let Err(error) = document.handle_operation(step.inverse.clone()) {
				let restore = self.steps[self.steps.len() - reverted..].iter().map(|step| step.forward.clone());
				self.restore(document, restore);
				return Err(error);
			}
		}
		Ok(())
	}

	/// Applies every forward operation in order. If one fails, the steps already reapplied are reverted again.
	fn reapply(&self, document: &mut Document) -> Result<(), DocumentError> {
		for (reapplied, step) in self.steps.iter().enumerate() {
			if let Err(error) = document.handle_operation(step.forward.clone()) {
				let restore = self.steps[..reapplied].iter().rev().map(|step| step.inverse.clone());
				self.restore(document, restore);
				return Err(error);
			}
		}
		Ok(())
	}

	fn restore(&self, document: &mut Document, operations: impl Iterator<Item = DocumentOperation>) {
		for operation in operations {
			if let Err(error) = document.handle_operation(operation) {
				error!("Could not restore the document while unwinding \"{}\": {error}", self.label);
				return;
			}
		}
	}
}

/// Undo/redo log of committed transactions, plus the one transaction currently being recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentHistory {
	undo_stack: VecDeque<Transaction>,
	redo_stack: Vec<Transaction>,
	pending: Option<Transaction>,
	max_len: usize,
}

impl Default for DocumentHistory {
	fn default() -> Self {
		Self::with_max_len(DEFAULT_MAX_UNDO_HISTORY_LEN)
	}
}

impl DocumentHistory {
	pub fn with_max_len(max_len: usize) -> Self {
		Self {
			undo_stack: VecDeque::new(),
			redo_stack: Vec::new(),
			pending: None,
			max_len,
		}
	}

	/// Changes how many transactions can be undone, dropping the oldest ones if there are too many.
	pub fn set_max_len(&mut self, max_len: usize) {
		self.max_len = max_len;
		self.trim();
	}

	pub fn max_len(&self) -> usize {
		self.max_len
	}

	pub fn is_transaction_in_progress(&self) -> bool {
		self.pending.is_some()
	}

	pub fn undo_len(&self) -> usize {
		self.undo_stack.len()
	}

	pub fn undo_label(&self) -> Option<&str> {
		self.undo_stack.back().map(|transaction| transaction.label.as_str())
	}

	pub fn redo_label(&self) -> Option<&str> {
		self.redo_stack.last().map(|transaction| transaction.label.as_str())
	}

	pub fn begin(&mut self, label: impl Into<String>) -> Result<(), DocumentError> {
		if let Some(pending) = &self.pending {
			return Err(DocumentError::TransactionAlreadyInProgress(pending.label.clone()));
		}

		let label = label.into();
		debug!("Starting transaction \"{label}\"");
		self.pending = Some(Transaction::new(label));
		Ok(())
	}

	/// Appends an already applied operation and its inverse to the open transaction.
	pub fn record(&mut self, forward: DocumentOperation, inverse: DocumentOperation) -> Result<(), DocumentError> {
		let pending = self.pending.as_mut().ok_or(DocumentError::NoTransactionInProgress)?;
		pending.steps.push(TransactionStep { forward, inverse });
		Ok(())
	}

	/// Closes the open transaction. A transaction that recorded nothing is discarded instead of becoming an empty undo step.
	pub fn commit(&mut self) -> Result<(), DocumentError> {
		let transaction = self.pending.take().ok_or(DocumentError::NoTransactionInProgress)?;

		if transaction.steps.is_empty() {
			debug!("Discarding empty transaction \"{}\"", transaction.label);
			return Ok(());
		}

		debug!("Committing transaction \"{}\" with {} steps", transaction.label, transaction.steps.len());
		self.redo_stack.clear();
		self.undo_stack.push_back(transaction);
		self.trim();
		Ok(())
	}

	/// Reverts everything the open transaction recorded and closes it without adding a history entry.
	pub fn rollback(&mut self, document: &mut Document) -> Result<(), DocumentError> {
		let transaction = self.pending.take().ok_or(DocumentError::NoTransactionInProgress)?;

		warn!("Rolling back transaction \"{}\" ({} steps)", transaction.label, transaction.steps.len());
		transaction.revert(document)
	}

	pub fn undo(&mut self, document: &mut Document) -> Result<(), DocumentError> {
		if let Some(pending) = &self.pending {
			return Err(DocumentError::TransactionAlreadyInProgress(pending.label.clone()));
		}
		let transaction = self.undo_stack.pop_back().ok_or(DocumentError::NothingToUndo)?;

		if let Err(error) = transaction.revert(document) {
			self.undo_stack.push_back(transaction);
			return Err(error);
		}
		self.redo_stack.push(transaction);
		if self.redo_stack.len() > self.max_len {
			self.redo_stack.remove(0);
		}
		Ok(())
	}

	pub fn redo(&mut self, document: &mut Document) -> Result<(), DocumentError> {
		if let Some(pending) = &self.pending {
			return Err(DocumentError::TransactionAlreadyInProgress(pending.label.clone()));
		}
		let transaction = self.redo_stack.pop().ok_or(DocumentError::NothingToRedo)?;

		if let Err(error) = transaction.reapply(document) {
			self.redo_stack.push(transaction);
			return Err(error);
		}
		self.undo_stack.push_back(transaction);
		self.trim();
		Ok(())
	}

	fn trim(&mut self) {
		while self.undo_stack.len() > self.max_len {
			self.undo_stack.pop_front();
		}
	}
}
