//! Pattern: State
//! Example: a vending machine whose four states each decide what an action means,
//! and a media player switching between playing, paused and stopped
//!
//! A rejected action returns a `VendingError` and leaves the machine where it was.

use std::fmt;

use thiserror::Error;

use crate::config::VendingSettings;
use crate::scaffold::Context;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VendingError {
    #[error("item out of stock")]
    OutOfStock,

    #[error("please select an item first")]
    SelectItemFirst,

    #[error("item already requested")]
    AlreadyRequested,

    #[error("item dispense in progress")]
    DispenseInProgress,

    #[error("please insert money first")]
    InsertMoneyFirst,

    #[error("inserted money is less than the price: inserted {inserted}, price {price}")]
    InsufficientMoney { price: u32, inserted: u32 },

    #[error("cannot add {added} items to a stock of {held}")]
    StockOverflow { held: u32, added: u32 },
}

// ============================================
// 1. Vending machine
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateKind {
    NoItem,
    HasItem,
    ItemRequested,
    HasMoney,
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StateKind::NoItem => "noItem",
            StateKind::HasItem => "hasItem",
            StateKind::ItemRequested => "itemRequested",
            StateKind::HasMoney => "hasMoney",
        };
        f.write_str(s)
    }
}

/// Data shared by every state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stock {
    pub item_count: u32,
    pub item_price: u32,
}

type Transition = Result<Box<dyn VendingState>, VendingError>;

/// One state of the machine. `Ok` carries the next state.
pub trait VendingState: fmt::Debug {
    fn kind(&self) -> StateKind;
    fn add_item(&self, stock: &mut Stock, count: u32) -> Transition;
    fn request_item(&self, stock: &mut Stock) -> Transition;
    fn insert_money(&self, stock: &mut Stock, money: u32) -> Transition;
    fn dispense_item(&self, stock: &mut Stock) -> Transition;
}

#[derive(Debug)]
struct NoItem;
#[derive(Debug)]
struct HasItem;
#[derive(Debug)]
struct ItemRequested;
#[derive(Debug)]
struct HasMoney;

fn restock(stock: &mut Stock, count: u32) -> Result<(), VendingError> {
    stock.item_count = stock
        .item_count
        .checked_add(count)
        .ok_or(VendingError::StockOverflow {
            held: stock.item_count,
            added: count,
        })?;
    Ok(())
}

fn has_stock(stock: &Stock) -> Box<dyn VendingState> {
    if stock.item_count == 0 {
        Box::new(NoItem)
    } else {
        Box::new(HasItem)
    }
}

impl VendingState for NoItem {
    fn kind(&self) -> StateKind {
        StateKind::NoItem
    }

    fn add_item(&self, stock: &mut Stock, count: u32) -> Transition {
        restock(stock, count)?;
        Ok(has_stock(stock))
    }

    fn request_item(&self, _: &mut Stock) -> Transition {
        Err(VendingError::OutOfStock)
    }

    fn insert_money(&self, _: &mut Stock, _: u32) -> Transition {
        Err(VendingError::OutOfStock)
    }

    fn dispense_item(&self, _: &mut Stock) -> Transition {
        Err(VendingError::OutOfStock)
    }
}

impl VendingState for HasItem {
    fn kind(&self) -> StateKind {
        StateKind::HasItem
    }

    fn add_item(&self, stock: &mut Stock, count: u32) -> Transition {
        restock(stock, count)?;
        Ok(Box::new(HasItem))
    }

    fn request_item(&self, _: &mut Stock) -> Transition {
        Ok(Box::new(ItemRequested))
    }

    fn insert_money(&self, _: &mut Stock, _: u32) -> Transition {
        Err(VendingError::SelectItemFirst)
    }

    fn dispense_item(&self, _: &mut Stock) -> Transition {
        Err(VendingError::SelectItemFirst)
    }
}

impl VendingState for ItemRequested {
    fn kind(&self) -> StateKind {
        StateKind::ItemRequested
    }

    fn add_item(&self, _: &mut Stock, _: u32) -> Transition {
        Err(VendingError::DispenseInProgress)
    }

    fn request_item(&self, _: &mut Stock) -> Transition {
        Err(VendingError::AlreadyRequested)
    }

    fn insert_money(&self, stock: &mut Stock, money: u32) -> Transition {
        if money < stock.item_price {
            return Err(VendingError::InsufficientMoney {
                price: stock.item_price,
                inserted: money,
            });
        }
        Ok(Box::new(HasMoney))
    }

    fn dispense_item(&self, _: &mut Stock) -> Transition {
        Err(VendingError::InsertMoneyFirst)
    }
}

impl VendingState for HasMoney {
    fn kind(&self) -> StateKind {
        StateKind::HasMoney
    }

    fn add_item(&self, _: &mut Stock, _: u32) -> Transition {
        Err(VendingError::DispenseInProgress)
    }

    fn request_item(&self, _: &mut Stock) -> Transition {
        Err(VendingError::DispenseInProgress)
    }

    fn insert_money(&self, _: &mut Stock, _: u32) -> Transition {
        Err(VendingError::DispenseInProgress)
    }

    fn dispense_item(&self, stock: &mut Stock) -> Transition {
        stock.item_count = stock.item_count.saturating_sub(1);
        Ok(has_stock(stock))
    }
}

#[derive(Debug)]
pub struct VendingMachine {
    state: Box<dyn VendingState>,
    stock: Stock,
}

impl VendingMachine {
    /// Starts in `HasItem`, or `NoItem` when built with an empty stock.
    pub fn new(item_count: u32, item_price: u32) -> Self {
        let stock = Stock {
            item_count,
            item_price,
        };
        Self {
            state: has_stock(&stock),
            stock,
        }
    }

    pub fn from_settings(settings: &VendingSettings) -> Self {
        Self::new(settings.item_count, settings.item_price)
    }

    pub fn state(&self) -> StateKind {
        self.state.kind()
    }

    pub fn item_count(&self) -> u32 {
        self.stock.item_count
    }

    pub fn item_price(&self) -> u32 {
        self.stock.item_price
    }

    fn apply(&mut self, action: &'static str, transition: Transition) -> Result<StateKind, VendingError> {
        let from = self.state.kind();
        match transition {
            Ok(next) => {
                self.state = next;
                tracing::info!(action, %from, to = %self.state.kind(), "vending transition");
                Ok(self.state.kind())
            }
            Err(err) => {
                tracing::warn!(action, state = %from, error = %err, "vending action rejected");
                Err(err)
            }
        }
    }

    pub fn add_item(&mut self, count: u32) -> Result<StateKind, VendingError> {
        let transition = self.state.add_item(&mut self.stock, count);
        self.apply("add_item", transition)
    }

    pub fn request_item(&mut self) -> Result<StateKind, VendingError> {
        let transition = self.state.request_item(&mut self.stock);
        self.apply("request_item", transition)
    }

    pub fn insert_money(&mut self, money: u32) -> Result<StateKind, VendingError> {
        let transition = self.state.insert_money(&mut self.stock, money);
        self.apply("insert_money", transition)
    }

    pub fn dispense_item(&mut self) -> Result<StateKind, VendingError> {
        let transition = self.state.dispense_item(&mut self.stock);
        self.apply("dispense_item", transition)
    }
}

// ============================================
// 2. Media player
// ============================================

pub trait PlayerState {
    fn label(&self) -> &'static str;
    fn handle_song(&self, song: &str) -> String;
}

pub struct Playing;
pub struct Paused;
pub struct Stopped;

impl PlayerState for Playing {
    fn label(&self) -> &'static str {
        "playing"
    }

    fn handle_song(&self, song: &str) -> String {
        format!("Playing song: {song}")
    }
}

impl PlayerState for Paused {
    fn label(&self) -> &'static str {
        "paused"
    }

    fn handle_song(&self, song: &str) -> String {
        format!("Paused song: {song}")
    }
}

impl PlayerState for Stopped {
    fn label(&self) -> &'static str {
        "stopped"
    }

    fn handle_song(&self, song: &str) -> String {
        format!("Stopped song: {song}")
    }
}

pub struct MediaPlayer {
    song: String,
    state: Context<dyn PlayerState>,
}

impl MediaPlayer {
    pub fn new(song: impl Into<String>) -> Self {
        Self {
            song: song.into(),
            state: Context::new(Box::new(Stopped)),
        }
    }

    pub fn play(&mut self) -> String {
        self.change_state(Box::new(Playing))
    }

    pub fn pause(&mut self) -> String {
        self.change_state(Box::new(Paused))
    }

    pub fn stop(&mut self) -> String {
        self.change_state(Box::new(Stopped))
    }

    fn change_state(&mut self, next: Box<dyn PlayerState>) -> String {
        self.state.replace(next);
        self.state.active().handle_song(&self.song)
    }

    pub fn state(&self) -> &'static str {
        self.state.active().label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_with_rejected_payment() {
        let mut vm = VendingMachine::new(1, 10);
        assert_eq!(vm.state(), StateKind::HasItem);

        assert_eq!(vm.request_item(), Ok(StateKind::ItemRequested));
        assert_eq!(
            vm.insert_money(5),
            Err(VendingError::InsufficientMoney {
                price: 10,
                inserted: 5
            })
        );
        assert_eq!(vm.state(), StateKind::ItemRequested);

        assert_eq!(vm.insert_money(10), Ok(StateKind::HasMoney));
        assert_eq!(vm.dispense_item(), Ok(StateKind::NoItem));
        assert_eq!(vm.item_count(), 0);
    }

    #[test]
    fn test_restock_cycle() {
        let mut vm = VendingMachine::new(0, 10);
        assert_eq!(vm.state(), StateKind::NoItem);
        assert_eq!(vm.request_item(), Err(VendingError::OutOfStock));

        assert_eq!(vm.add_item(2), Ok(StateKind::HasItem));
        vm.request_item().unwrap();
        vm.insert_money(20).unwrap();
        assert_eq!(vm.dispense_item(), Ok(StateKind::HasItem));
        assert_eq!(vm.item_count(), 1);
    }

    #[test]
    fn test_each_state_rejects_out_of_order_actions() {
        let mut vm = VendingMachine::new(3, 10);
        assert_eq!(vm.insert_money(10), Err(VendingError::SelectItemFirst));
        assert_eq!(vm.dispense_item(), Err(VendingError::SelectItemFirst));

        vm.request_item().unwrap();
        assert_eq!(vm.request_item(), Err(VendingError::AlreadyRequested));
        assert_eq!(vm.add_item(1), Err(VendingError::DispenseInProgress));
        assert_eq!(vm.dispense_item(), Err(VendingError::InsertMoneyFirst));

        vm.insert_money(10).unwrap();
        assert_eq!(vm.request_item(), Err(VendingError::DispenseInProgress));
        assert_eq!(vm.insert_money(10), Err(VendingError::DispenseInProgress));
        assert_eq!(vm.state(), StateKind::HasMoney);
        assert_eq!(vm.item_count(), 3);
    }

    #[test]
    fn test_restock_overflow_is_rejected() {
        let mut vm = VendingMachine::new(1, 10);
        assert_eq!(
            vm.add_item(u32::MAX),
            Err(VendingError::StockOverflow {
                held: 1,
                added: u32::MAX
            })
        );
        assert_eq!(vm.state(), StateKind::HasItem);
        assert_eq!(vm.item_count(), 1);

        let mut empty = VendingMachine::new(0, 10);
        assert_eq!(empty.add_item(u32::MAX), Ok(StateKind::HasItem));
        assert!(matches!(empty.add_item(1), Err(VendingError::StockOverflow { .. })));
        assert_eq!(empty.item_count(), u32::MAX);
    }

    #[test]
    fn test_media_player_states() {
        let mut player = MediaPlayer::new("fear of the dark");
        assert_eq!(player.state(), "stopped");
        assert_eq!(player.play(), "Playing song: fear of the dark");
        assert_eq!(player.pause(), "Paused song: fear of the dark");
        assert_eq!(player.state(), "paused");
        assert_eq!(player.stop(), "Stopped song: fear of the dark");
    }
}
