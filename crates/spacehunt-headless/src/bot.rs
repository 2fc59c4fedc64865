use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use spacehunt_core::collab::{Command, InputSource};

/// Longest run of one command, in frames.
const MAX_HOLD_FRAMES: u32 = 30;

/// Commands the bot picks from, with relative weights.
const WEIGHTED: [(Command, u32); 7] = [
    (Command::MoveRight, 6),
    (Command::MoveLeft, 3),
    (Command::Shoot, 4),
    (Command::Jump, 2),
    (Command::LookUp, 1),
    (Command::Morph, 1),
    (Command::None, 2),
];

/// Seeded random input: picks a command and repeats it for a random number
/// of frames, the way a player holds a key.
pub struct BotInput {
    rng: StdRng,
    current: Command,
    hold: u32,
}

impl BotInput {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            current: Command::None,
            hold: 0,
        }
    }

    fn pick(&mut self) -> Command {
        let total: u32 = WEIGHTED.iter().map(|(_, w)| w).sum();
        let mut roll = self.rng.random_range(0..total);
        for (command, weight) in WEIGHTED {
            if roll < weight {
                return command;
            }
            roll -= weight;
        }
        Command::None
    }
}

impl InputSource for BotInput {
    fn poll_command(&mut self) -> Command {
        if self.hold == 0 {
            self.current = self.pick();
            self.hold = self.rng.random_range(1..=MAX_HOLD_FRAMES);
        }
        self.hold -= 1;
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_commands() {
        let mut a = BotInput::new(5);
        let mut b = BotInput::new(5);
        for _ in 0..500 {
            assert_eq!(a.poll_command(), b.poll_command());
        }
    }

    #[test]
    fn commands_are_held_then_change() {
        let mut bot = BotInput::new(11);
        let commands: Vec<Command> = (0..2000).map(|_| bot.poll_command()).collect();
        let longest = commands
            .chunk_by(|a, b| a == b)
            .map(<[Command]>::len)
            .max()
            .unwrap();
        assert!(longest > 1, "Commands should be held");
        assert!(commands.contains(&Command::Shoot));
        assert!(commands.contains(&Command::MoveRight));
    }
}
