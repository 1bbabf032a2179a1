use std::fmt;

use regex::Regex;
use tracing::{info, warn};

/// Receives the raw text of every interpreted line.
///
/// The interpreter does not consume any result: awarding, recording and
/// notifying are entirely up to the implementation.
pub trait AchievementEngine {
    /// Checks `raw_line` against the challenges and awards every newly
    /// completed one.
    fn check_and_award(&mut self, raw_line: &str);
}

/// A challenge a user can complete by typing a matching line.
#[derive(Debug, Clone, PartialEq)]
pub struct Challenge {
    /// Stable identifier, used in award records.
    pub id:          u32,
    /// What the user has to do.
    pub description: &'static str,
    /// Relative difficulty, for display.
    pub difficulty:  f64,
    /// Points granted on completion.
    pub reward:      u32,
    /// Pattern a line has to contain to complete the challenge. Challenges
    /// without a pattern cannot be completed by typing a line.
    pub pattern:     Option<&'static str>,
}

/// The built-in challenge table.
#[must_use]
pub fn default_challenges() -> Vec<Challenge> {
    vec![Challenge { id:          1,
                     description: "Entangle two particles",
                     difficulty:  1.0,
                     reward:      10,
                     pattern:     Some(r"\w*(ENTANGLE|E|e|entangle|Entangle)\((\w+,\w+)\)\w*"), },
         Challenge { id:          2,
                     description: "Use a hadamard gate for the first time",
                     difficulty:  0.5,
                     reward:      5,
                     pattern:     Some(r"\w*(hadamard|h|H|HADAMARD)\((\w+|(\w*,\w+)+)\)\w*"), },
         Challenge { id:          3,
                     description: "Teleport a particle",
                     difficulty:  2.5,
                     reward:      50,
                     pattern:     None, },]
}

/// A record of a completed challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Award {
    /// The completed challenge.
    pub challenge_id: u32,
    /// The points it granted.
    pub reward:       u32,
}

/// Called with every challenge as it is awarded.
pub type NotifyHook = Box<dyn FnMut(&Challenge)>;

/// An [`AchievementEngine`] over a fixed table of challenges.
///
/// Each challenge is awarded at most once per book. Awards are kept in
/// memory in the order they were earned.
///
/// # Example
/// ```
/// use qline::interpreter::achievement::{AchievementEngine, ChallengeBook};
///
/// let mut book = ChallengeBook::new();
/// book.check_and_award("H(q)");
/// book.check_and_award("H(q)");
///
/// assert_eq!(book.awards().len(), 1);
/// assert_eq!(book.total_reward(), 5);
/// ```
pub struct ChallengeBook {
    challenges: Vec<(Challenge, Option<Regex>)>,
    awards:     Vec<Award>,
    notify:     Option<NotifyHook>,
}

impl fmt::Debug for ChallengeBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChallengeBook")
         .field("challenges", &self.challenges.len())
         .field("awards", &self.awards)
         .finish_non_exhaustive()
    }
}

impl Default for ChallengeBook {
    fn default() -> Self {
        Self::new()
    }
}

impl ChallengeBook {
    /// Creates a book with the [`default_challenges`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_challenges(default_challenges())
    }

    /// Creates a book over `challenges`.
    ///
    /// A challenge whose pattern does not compile is kept but can never be
    /// completed.
    #[must_use]
    pub fn with_challenges(challenges: Vec<Challenge>) -> Self {
        let challenges = challenges.into_iter()
                                   .map(|challenge| {
                                       let regex = compile_pattern(&challenge);
                                       (challenge, regex)
                                   })
                                   .collect();

        Self { challenges,
               awards: Vec::new(),
               notify: None }
    }

    /// Installs a hook that is called for every award.
    #[must_use]
    pub fn on_award(mut self, hook: NotifyHook) -> Self {
        self.notify = Some(hook);
        self
    }

    /// The awards earned so far, oldest first.
    #[must_use]
    pub fn awards(&self) -> &[Award] {
        &self.awards
    }

    /// The sum of all awarded rewards.
    #[must_use]
    pub fn total_reward(&self) -> u32 {
        self.awards.iter().map(|award| award.reward).sum()
    }

    fn is_awarded(&self, id: u32) -> bool {
        self.awards.iter().any(|award| award.challenge_id == id)
    }
}

fn compile_pattern(challenge: &Challenge) -> Option<Regex> {
    let pattern = challenge.pattern?;
    match Regex::new(pattern) {
        Ok(regex) => Some(regex),
        Err(e) => {
            warn!(id = challenge.id, error = %e, "challenge pattern does not compile");
            None
        },
    }
}

impl AchievementEngine for ChallengeBook {
    fn check_and_award(&mut self, raw_line: &str) {
        let completed: Vec<usize> =
            self.challenges
                .iter()
                .enumerate()
                .filter(|(_, (challenge, regex))| {
                    !self.is_awarded(challenge.id)
                    && regex.as_ref().is_some_and(|regex| regex.is_match(raw_line))
                })
                .map(|(i, _)| i)
                .collect();

        for i in completed {
            let challenge = &self.challenges[i].0;
            info!(id = challenge.id,
                  reward = challenge.reward,
                  "challenge completed: {}",
                  challenge.description);

            self.awards.push(Award { challenge_id: challenge.id,
                                     reward:       challenge.reward, });
            if let Some(notify) = self.notify.as_mut() {
                notify(challenge);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    #[test]
    fn entangling_and_hadamard_are_recognized() {
        let mut book = ChallengeBook::new();
        book.check_and_award("entangle(a,b)");
        book.check_and_award("hadamard(q)");

        assert_eq!(book.awards(),
                   [Award { challenge_id: 1,
                            reward:       10, },
                    Award { challenge_id: 2,
                            reward:       5, }]);
        assert_eq!(book.total_reward(), 15);
    }

    #[test]
    fn each_challenge_is_awarded_once() {
        let mut book = ChallengeBook::new();
        for _ in 0..3 {
            book.check_and_award("E(a,b)");
        }
        assert_eq!(book.awards().len(), 1);
    }

    #[test]
    fn unrelated_lines_award_nothing() {
        let mut book = ChallengeBook::new();
        book.check_and_award("x=1+2");
        book.check_and_award("CNOT(a,b)");
        assert!(book.awards().is_empty());
    }

    #[test]
    fn challenges_without_a_pattern_are_never_completed() {
        let mut book = ChallengeBook::with_challenges(vec![default_challenges()[2].clone()]);
        book.check_and_award("teleport(a)");
        assert!(book.awards().is_empty());
    }

    #[test]
    fn the_hook_sees_every_award() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut book =
            ChallengeBook::new().on_award(Box::new(move |challenge| {
                                    sink.borrow_mut().push(challenge.description);
                                }));

        book.check_and_award("H(q)");
        assert_eq!(*seen.borrow(), ["Use a hadamard gate for the first time"]);
    }
}
