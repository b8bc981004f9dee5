//! Dev table: plays scripted mock rounds and prints session snapshots.

use anyhow::Result;
use chiphouse_client::{MockLedger, MockTable, Session, SessionStatus, TableEvent};
use chiphouse_engine::GameRng;
use chiphouse_types::casino::{
    DiceBet, GameInfo, RollOverBet, RouletteBet, RouletteBetKind, SlotsBet,
};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play scripted mock rounds against the chiphouse engines")]
struct Args {
    /// RNG seed for reproducible rounds
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Bet per round in whole chips
    #[arg(long, default_value_t = 100)]
    bet: u64,

    /// Blackjack rounds to play
    #[arg(long, default_value_t = 3)]
    rounds: u32,

    /// List offered games and exit
    #[arg(long)]
    list: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let args = Args::parse();

    if args.list {
        for game in GameInfo::all() {
            println!(
                "{:<10} {:?}  edge {}bps  bet {}..{}",
                game.name, game.category, game.house_edge_bps, game.min_bet, game.max_bet
            );
        }
        return Ok(());
    }

    let ledger = MockLedger::shared();
    let table = MockTable::new(ledger.clone(), GameRng::from_seed(args.seed));
    let (mut session, mut events) =
        Session::new(table, ledger, GameRng::from_seed(args.seed.wrapping_add(1)));

    for round in 1..=args.rounds {
        info!(round, bet = args.bet, "starting blackjack round");
        session.start_game(args.bet).await?;
        loop {
            let snapshot = session.snapshot();
            match snapshot.status {
                SessionStatus::Playing => {
                    if snapshot.player_score < 17 {
                        session.hit().await?;
                    } else {
                        session.stand().await?;
                    }
                }
                SessionStatus::GameOver => break,
                _ => {}
            }
        }
        session.resolve_game().await?;
        for event in events.drain() {
            match event {
                TableEvent::RoundResolved(outcome) => {
                    info!(kind = ?outcome.kind, payout = outcome.payout, "round resolved")
                }
                TableEvent::DealerCard(card) => info!(%card, "dealer card"),
                TableEvent::PlayerCard(card) => info!(%card, "player card"),
                TableEvent::BalanceChanged(balance) => info!(balance, "balance"),
                TableEvent::Message(message) => info!(%message, "message"),
            }
        }
        session.acknowledge_result();
        println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
    }

    info!("one spin of each single-shot game");
    let dice = session.play_dice(DiceBet::Exact(3), args.bet)?;
    info!(kind = ?dice.kind, payout = dice.payout, "dice");
    let roll = session.play_roll_over(RollOverBet::new(5050)?, args.bet)?;
    info!(kind = ?roll.kind, payout = roll.payout, "roll-over");
    let spin = session.play_roulette(&[RouletteBet::new(RouletteBetKind::Red, 0, args.bet)?])?;
    info!(kind = ?spin.kind, payout = spin.payout, "roulette");
    let reels = session.play_slots(SlotsBet::new(5, args.bet.max(5) / 5)?)?;
    info!(kind = ?reels.kind, payout = reels.payout, "slots");

    info!(balance = session.balance(), "final balance");
    Ok(())
}
