//! Coin-operated turnstile
//!
//! Demonstrates:
//! - Declaring transitions and loops on the builder
//! - Before/after, enter/leave and global hooks
//! - A hook vetoing a transition
//! - `can` running the pre-transition hooks without moving
//!
//! Run with: cargo run --example turnstile

use statehook::{StateMachine, StateMachineBuilder};
use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum Turnstile {
    Locked,
    Unlocked,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum Input {
    Coin,
    Push,
}

#[derive(Debug)]
struct Rejected(&'static str);

impl fmt::Display for Rejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rejected: {}", self.0)
    }
}

/// Value of the coin inserted, in cents.
type Cents = u32;

fn main() {
    let mut turnstile: StateMachine<Turnstile, Input, Cents, Rejected> =
        StateMachineBuilder::<Turnstile, Input, Cents, Rejected>::new()
            .initial(Turnstile::Locked)
            .event(Input::Coin, [Turnstile::Locked], Turnstile::Unlocked)
            .event(Input::Push, [Turnstile::Unlocked], Turnstile::Locked)
            .stay(Input::Coin, [Turnstile::Unlocked])
            .before(Input::Coin, |_, cents| {
                if *cents < 50 {
                    Err(Rejected("coin too small"))
                } else {
                    Ok(())
                }
            })
            .on_leave(Turnstile::Locked, |state, _| {
                println!("  releasing lock (currently {:?})", state);
                Ok(())
            })
            .after(Input::Push, |state, _| {
                println!("  visitor passed, now {:?}", state);
                Ok(())
            })
            .after_any(|state, _| {
                println!("  -> {:?}", state);
                Ok(())
            })
            .record_history()
            .build()
            .unwrap();

    println!("=== Turnstile ===\n");

    println!("Can a 10c coin unlock it?");
    match turnstile.can(&Input::Coin, &10) {
        Ok(_) => println!("  yes"),
        Err(err) => println!("  no, {}", err),
    }

    println!("Insert 10c:");
    if let Err(err) = turnstile.event(Input::Coin, &10) {
        println!("  {}", err);
    }

    println!("Insert 50c:");
    turnstile.event(Input::Coin, &50).unwrap();

    println!("Insert another 50c (loop, no after hooks):");
    turnstile.event(Input::Coin, &50).unwrap();

    println!("Push:");
    turnstile.event(Input::Push, &0).unwrap();

    println!("Push again:");
    if let Err(err) = turnstile.event(Input::Push, &0) {
        println!("  {}", err);
    }

    if let Some(history) = turnstile.history() {
        println!("\nPath: {:?}", history.get_path());
    }

    println!("\n=== Example Complete ===");
}
