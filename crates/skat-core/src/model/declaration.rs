use crate::model::game_type::GameType;
use core::fmt;

/// Extras announced before trick-taking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Modifier {
    NoKitty,
    Reveals,
    CallsThreeQuarters,
    CallsEverything,
}

impl Modifier {
    pub const ALL: [Modifier; 4] = [
        Modifier::NoKitty,
        Modifier::Reveals,
        Modifier::CallsThreeQuarters,
        Modifier::CallsEverything,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Modifier::NoKitty => "no kitty",
            Modifier::Reveals => "reveals",
            Modifier::CallsThreeQuarters => "calls three quarters",
            Modifier::CallsEverything => "calls everything",
        }
    }

    pub const fn is_call(self) -> bool {
        matches!(self, Modifier::CallsThreeQuarters | Modifier::CallsEverything)
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tags appended while scoring a finished round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    TakesThreeQuarters,
    LosesThreeQuarters,
    TakesEverything,
    LosesEverything,
}

impl Outcome {
    pub const fn as_str(self) -> &'static str {
        match self {
            Outcome::TakesThreeQuarters => "takes three quarters",
            Outcome::LosesThreeQuarters => "loses three quarters",
            Outcome::TakesEverything => "takes everything",
            Outcome::LosesEverything => "loses everything",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclarationError {
    IllegalModifier {
        game_type: GameType,
        modifier: Modifier,
    },
    RequiresNoKitty(Modifier),
    NoKittyAfterPickup,
    Duplicate(Modifier),
}

impl fmt::Display for DeclarationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclarationError::IllegalModifier {
                game_type,
                modifier,
            } => write!(f, "'{modifier}' cannot be declared in a {game_type} game"),
            DeclarationError::RequiresNoKitty(modifier) => {
                write!(f, "'{modifier}' requires skipping the kitty")
            }
            DeclarationError::NoKittyAfterPickup => {
                write!(f, "'no kitty' declared after picking up the kitty")
            }
            DeclarationError::Duplicate(modifier) => write!(f, "'{modifier}' declared twice"),
        }
    }
}

impl std::error::Error for DeclarationError {}

/// Game type plus its legality-checked extras and, once scored, outcome tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    game_type: GameType,
    modifiers: Vec<Modifier>,
    outcomes: Vec<Outcome>,
}

impl Declaration {
    /// Validate `declared` extras for `game_type`. `NoKitty` is implied when
    /// the kitty was skipped and may be repeated, but never claimed otherwise.
    pub fn new(
        game_type: GameType,
        skipped_kitty: bool,
        declared: &[Modifier],
    ) -> Result<Self, DeclarationError> {
        let mut modifiers: Vec<Modifier> = Vec::with_capacity(declared.len() + 1);
        for &modifier in declared {
            if modifiers.contains(&modifier) {
                return Err(DeclarationError::Duplicate(modifier));
            }
            if modifier == Modifier::NoKitty && !skipped_kitty {
                return Err(DeclarationError::NoKittyAfterPickup);
            }
            modifiers.push(modifier);
        }
        if skipped_kitty && !modifiers.contains(&Modifier::NoKitty) {
            modifiers.push(Modifier::NoKitty);
        }
        modifiers.sort();

        for &modifier in &modifiers {
            let legal = match (game_type.is_null(), modifier) {
                (_, Modifier::NoKitty) => true,
                (true, Modifier::Reveals) => true,
                (false, m) => m.is_call(),
                (true, _) => false,
            };
            if !legal {
                return Err(DeclarationError::IllegalModifier {
                    game_type,
                    modifier,
                });
            }
            if modifier.is_call() && !skipped_kitty {
                return Err(DeclarationError::RequiresNoKitty(modifier));
            }
        }

        Ok(Self {
            game_type,
            modifiers,
            outcomes: Vec::new(),
        })
    }

    pub fn game_type(&self) -> GameType {
        self.game_type
    }

    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn has(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    pub fn has_outcome(&self, outcome: Outcome) -> bool {
        self.outcomes.contains(&outcome)
    }

    pub fn record_outcome(&mut self, outcome: Outcome) {
        if !self.has_outcome(outcome) {
            self.outcomes.push(outcome);
        }
    }

    /// Game type first, then extras, then outcome tags.
    pub fn labels(&self) -> Vec<String> {
        let mut labels = vec![self.game_type.to_string()];
        labels.extend(self.modifiers.iter().map(|m| m.to_string()));
        labels.extend(self.outcomes.iter().map(|o| o.to_string()));
        labels
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.labels().join(", "))
    }
}
