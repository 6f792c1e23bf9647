//! In-memory entity store.
//!
//! Holds the board, list and card collections in insertion order and hands
//! out identifiers from per-type sequences. Identifiers are never reused:
//! deleting the newest card does not make its id available again.

use serde::{Deserialize, Serialize};

use super::snapshot::Snapshot;
use crate::backend::{
    BackendError, CardFilter, CreateBoardArgs, CreateCardArgs, CreateListArgs, EntityKind, UpdateCardArgs,
};
use crate::entities::{board, card, list};

/// Next identifier to hand out for each entity type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdSequences {
    pub boards: i64,
    pub lists: i64,
    pub cards: i64,
}

impl Default for IdSequences {
    fn default() -> Self {
        Self {
            boards: 1,
            lists: 1,
            cards: 1,
        }
    }
}

fn exhausted(kind: EntityKind) -> BackendError {
    BackendError::Storage(format!("{kind} identifiers exhausted"))
}

/// Take the current value of `sequence` and advance it.
fn next_id(sequence: &mut i64, kind: EntityKind) -> Result<i64, BackendError> {
    let id = *sequence;
    *sequence = id.checked_add(1).ok_or_else(|| exhausted(kind))?;
    Ok(id)
}

/// Resume a sequence so it stays ahead of every id already in use.
fn resume(stored: i64, ids: impl Iterator<Item = i64>, kind: EntityKind) -> Result<i64, BackendError> {
    let after_max = match ids.max() {
        Some(max) => max.checked_add(1).ok_or_else(|| exhausted(kind))?,
        None => 1,
    };
    Ok(stored.max(after_max).max(1))
}

/// Owned collections of boards, lists and cards.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    boards: Vec<board::Model>,
    lists: Vec<list::Model>,
    cards: Vec<card::Model>,
    next_ids: IdSequences,
}

impl EntityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from a loaded snapshot.
    ///
    /// Fails when a stored id leaves no room for the next one.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, BackendError> {
        let stored = snapshot.next_ids.unwrap_or_default();
        let next_ids = IdSequences {
            boards: resume(stored.boards, snapshot.boards.iter().map(|b| b.id), EntityKind::Board)?,
            lists: resume(stored.lists, snapshot.lists.iter().map(|l| l.id), EntityKind::List)?,
            cards: resume(stored.cards, snapshot.cards.iter().map(|c| c.id), EntityKind::Card)?,
        };

        Ok(Self {
            boards: snapshot.boards,
            lists: snapshot.lists,
            cards: snapshot.cards,
            next_ids,
        })
    }

    /// Capture the whole store as a snapshot document.
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            boards: self.boards.clone(),
            lists: self.lists.clone(),
            cards: self.cards.clone(),
            next_ids: Some(self.next_ids),
        }
    }

    pub fn boards(&self) -> &[board::Model] {
        &self.boards
    }

    pub fn board_exists(&self, board_id: i64) -> bool {
        self.boards.iter().any(|b| b.id == board_id)
    }

    pub fn list_exists(&self, list_id: i64) -> bool {
        self.lists.iter().any(|l| l.id == list_id)
    }

    fn card_mut(&mut self, card_id: i64) -> Result<&mut card::Model, BackendError> {
        self.cards
            .iter_mut()
            .find(|c| c.id == card_id)
            .ok_or(BackendError::NotFound {
                kind: EntityKind::Card,
                id: card_id,
            })
    }

    pub fn create_board(&mut self, args: CreateBoardArgs) -> Result<board::Model, BackendError> {
        let board = board::Model {
            id: next_id(&mut self.next_ids.boards, EntityKind::Board)?,
            name: args.name,
        };
        self.boards.push(board.clone());
        Ok(board)
    }

    pub fn create_list(&mut self, args: CreateListArgs) -> Result<list::Model, BackendError> {
        if !self.board_exists(args.board_id) {
            return Err(BackendError::ParentNotFound {
                kind: EntityKind::Board,
                id: args.board_id,
            });
        }

        let list = list::Model {
            id: next_id(&mut self.next_ids.lists, EntityKind::List)?,
            board_id: args.board_id,
            name: args.name,
        };
        self.lists.push(list.clone());
        Ok(list)
    }

    pub fn lists_by_board(&self, board_id: i64) -> Result<Vec<list::Model>, BackendError> {
        if !self.board_exists(board_id) {
            return Err(BackendError::ParentNotFound {
                kind: EntityKind::Board,
                id: board_id,
            });
        }

        Ok(self.lists.iter().filter(|l| l.board_id == board_id).cloned().collect())
    }

    pub fn create_card(&mut self, args: CreateCardArgs) -> Result<card::Model, BackendError> {
        if !self.list_exists(args.list_id) {
            return Err(BackendError::ParentNotFound {
                kind: EntityKind::List,
                id: args.list_id,
            });
        }

        let status = args.status_or_default();
        let card = card::Model {
            id: next_id(&mut self.next_ids.cards, EntityKind::Card)?,
            list_id: args.list_id,
            title: args.title,
            description: args.description,
            assignee: args.assignee,
            status,
        };
        self.cards.push(card.clone());
        Ok(card)
    }

    pub fn get_card(&self, card_id: i64) -> Result<card::Model, BackendError> {
        self.cards
            .iter()
            .find(|c| c.id == card_id)
            .cloned()
            .ok_or(BackendError::NotFound {
                kind: EntityKind::Card,
                id: card_id,
            })
    }

    pub fn list_cards(&self, filter: &CardFilter) -> Vec<card::Model> {
        self.cards.iter().filter(|c| filter.matches(c)).cloned().collect()
    }

    pub fn update_card(&mut self, card_id: i64, args: &UpdateCardArgs) -> Result<card::Model, BackendError> {
        let card = self.card_mut(card_id)?;
        args.apply_to(card);
        Ok(card.clone())
    }

    /// Remove a card, returning whether anything was removed.
    pub fn delete_card(&mut self, card_id: i64) -> bool {
        let before = self.cards.len();
        self.cards.retain(|c| c.id != card_id);
        self.cards.len() != before
    }

    pub fn move_card(&mut self, card_id: i64, target_list_id: i64) -> Result<card::Model, BackendError> {
        // Resolve both ends before touching the card.
        self.get_card(card_id)?;
        if !self.list_exists(target_list_id) {
            return Err(BackendError::ParentNotFound {
                kind: EntityKind::List,
                id: target_list_id,
            });
        }

        let card = self.card_mut(card_id)?;
        card.list_id = target_list_id;
        Ok(card.clone())
    }
}
