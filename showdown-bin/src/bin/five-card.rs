use std::error::Error;
use std::io::{stdin, stdout, BufRead, Write};

use itertools::Itertools;
use showdown_core::cards::DeckSeed;
use showdown_core::game::Game;
use structopt::StructOpt;

#[derive(StructOpt)]
struct Opt {
    #[structopt(long, default_value)]
    seed: DeckSeed,
    #[structopt(
        short,
        long,
        use_delimiter = true,
        default_value = "Anders,Julia,Fredrik,Kerstin"
    )]
    players: Vec<String>,
    #[structopt(long, help = "Silence game prompts (useful for tests with set input)")]
    no_prompts: bool,
}

fn wants_another_round(stream: &mut dyn BufRead, prompt: bool) -> Result<bool, Box<dyn Error>> {
    if prompt {
        print!("Do you want to play again? (y/n): ");
        stdout().flush()?;
    }
    let mut s = String::new();
    let n = stream.read_line(&mut s)?;
    // EOF quits, as does anything but y
    Ok(n != 0 && s.trim().eq_ignore_ascii_case("y"))
}

fn main() -> Result<(), Box<dyn Error>> {
    let opt = Opt::from_args();
    let mut game = Game::new(&opt.players, &opt.seed)?;
    if !opt.no_prompts {
        println!("Dealing to {} (seed {})", opt.players.iter().join(", "), opt.seed);
    }
    let stdin = stdin();
    let mut input = stdin.lock();
    loop {
        game.deal_round()?;
        for hand in game.hands() {
            println!("{}", hand);
        }
        if let Some(winner) = game.winner() {
            println!("The winner is {} with {}!", winner.name(), winner.category());
        }
        if !wants_another_round(&mut input, !opt.no_prompts)? {
            break;
        }
        println!();
        game.finish_round();
    }
    Ok(())
}
