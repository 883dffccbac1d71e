//! Psychoeducation mini-lessons and their milestone tracking.
//!
//! Each lesson offers three practices: write a reflection, pick a response
//! to a scenario, and talk it through with the support responder. Doing a
//! practice for the first time earns a milestone and a celebratory
//! message; repeats are acknowledged quietly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::LessonsConfig;
use crate::core::{AdvancePolicy, CompletionGate, MilestoneOutcome, MilestoneTracker, Rejection};
use crate::error::{PamojaError, Result};
use crate::services::SupportResponder;

pub const MILESTONE_REFLECTED: &str = "reflected";
pub const MILESTONE_PRACTICED: &str = "practiced";
pub const MILESTONE_TALKED: &str = "talked";

/// Milestones tracked by every lesson, in display order.
pub const LESSON_MILESTONES: [&str; 3] = [MILESTONE_REFLECTED, MILESTONE_PRACTICED, MILESTONE_TALKED];

const REFLECTION_REJECTED: &str = "Share as little or as much as you can, even one word is enough.";
const REFLECTION_THANKS: &str = "Thank you for sharing with yourself.";
const SUPPORT_REJECTED: &str = "Please share a little more for Pamoja to respond.";

/// Shown once all three milestones are reached.
pub const LESSON_COMPLETE_MESSAGE: &str = "You've completed this mini-practice.";

/// Lesson identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LessonId {
    Emotions,
    Splitting,
    SelfSoothe,
    Triggers,
}

impl LessonId {
    pub const ALL: [LessonId; 4] = [
        LessonId::Emotions,
        LessonId::Splitting,
        LessonId::SelfSoothe,
        LessonId::Triggers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LessonId::Emotions => "emotions",
            LessonId::Splitting => "splitting",
            LessonId::SelfSoothe => "self-soothe",
            LessonId::Triggers => "triggers",
        }
    }
}

impl fmt::Display for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LessonId {
    type Err = PamojaError;

    fn from_str(s: &str) -> Result<Self> {
        LessonId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| PamojaError::not_found("lesson", s))
    }
}

/// One possible response in a lesson scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioOption {
    pub id: &'static str,
    pub label: &'static str,
    pub explanation: &'static str,
    pub helpful: bool,
}

/// A short situation with a few ways to respond.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scenario {
    pub description: &'static str,
    pub options: Vec<ScenarioOption>,
}

impl Scenario {
    pub fn option(&self, id: &str) -> Option<&ScenarioOption> {
        self.options.iter().find(|o| o.id == id)
    }
}

/// Static lesson content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lesson {
    pub id: LessonId,
    pub title: &'static str,
    pub summary: &'static str,
    pub try_this: &'static str,
    pub reflection_prompt: &'static str,
    pub scenario: Scenario,
}

fn option(
    id: &'static str,
    label: &'static str,
    explanation: &'static str,
    helpful: bool,
) -> ScenarioOption {
    ScenarioOption {
        id,
        label,
        explanation,
        helpful,
    }
}

/// Content for the given lesson.
pub fn lesson(id: LessonId) -> Lesson {
    match id {
        LessonId::Emotions => Lesson {
            id,
            title: "Emotions Aren't Good or Bad",
            summary: "Emotions are just information. Anger might tell you a boundary was \
                      crossed. Sadness might tell you something was lost. The goal isn't to stop \
                      feeling, but to understand what your feelings are telling you without \
                      judgment.",
            try_this: "Notice one emotion in your body right now. Where do you feel it? Is it in \
                       your chest, your stomach, your hands? Just notice it without needing to \
                       change it.",
            reflection_prompt: "What's one feeling you've been told is 'wrong' or 'too much'?",
            scenario: Scenario {
                description: "Your friend cancels plans last minute. You feel a wave of intense \
                              disappointment and anger. What's a regulating response?",
                options: vec![
                    option(
                        "s1-a",
                        "Text them: 'You always do this, I can't rely on you!'",
                        "This reaction is understandable, but it can push friends away. It \
                         externalizes the feeling instead of tending to your own hurt first.",
                        false,
                    ),
                    option(
                        "s1-b",
                        "Acknowledge the feeling: 'Wow, this hurts. I feel really let down.'",
                        "This is a great first step. Naming the emotion without judgment calms \
                         the nervous system and makes the feeling feel less overwhelming.",
                        true,
                    ),
                    option(
                        "s1-c",
                        "Ignore it and pretend you don't care.",
                        "Suppressing feelings often makes them stronger later. Allowing \
                         yourself to feel is a form of self-care.",
                        false,
                    ),
                ],
            },
        },
        LessonId::Splitting => Lesson {
            id,
            title: "What is Splitting?",
            summary: "Splitting is a defense mechanism where the brain sorts things into \
                      all-good or all-bad categories because nuance feels too dangerous. It's a \
                      way your brain tries to protect you from uncertainty.",
            try_this: "Think of one person or situation you have very strong feelings about. Can \
                       you find one small, neutral or 'gray' fact about them?",
            reflection_prompt: "When was the last time something felt like it was either \
                                'perfect' or a 'total disaster'?",
            scenario: Scenario {
                description: "You have a great first date. Then they take too long to text back \
                              and you're convinced they hate you. What's a way to find the \
                              middle ground?",
                options: vec![
                    option(
                        "s2-a",
                        "Decide they are a terrible person and block them.",
                        "This is the 'all-bad' side of splitting. It protects you from \
                         potential rejection but also cuts off a possible connection.",
                        false,
                    ),
                    option(
                        "s2-b",
                        "Hold two truths: 'I had a really nice time, AND I feel anxious about \
                         their silence.'",
                        "This is dialectical thinking. It acknowledges both the positive reality \
                         and your current uncomfortable feeling without letting either one erase \
                         the other.",
                        true,
                    ),
                    option(
                        "s2-c",
                        "Text them 10 times to make sure they're not ignoring you.",
                        "This is an anxiety-driven response. It's an attempt to soothe your fear \
                         but can sometimes create the outcome you're afraid of.",
                        false,
                    ),
                ],
            },
        },
        LessonId::SelfSoothe => Lesson {
            id,
            title: "How to Self-Soothe",
            summary: "Self-soothing is about actively comforting yourself in a healthy way. It's \
                      not about ignoring problems, but about calming your nervous system so you \
                      can face them.",
            try_this: "Place a hand over your heart, close your eyes, and take one slow breath. \
                       Feel the warmth of your hand. That's it. You just self-soothed.",
            reflection_prompt: "What is one small thing that genuinely makes you feel even 1% \
                                calmer?",
            scenario: Scenario {
                description: "You're feeling overwhelmed and on the verge of a panic attack. \
                              Which self-soothing technique could you try right now?",
                options: vec![
                    option(
                        "s3-a",
                        "Scroll on social media to distract yourself.",
                        "Distraction can help, but social media can be overstimulating and lead \
                         to comparisons. It's a gamble.",
                        false,
                    ),
                    option(
                        "s3-b",
                        "Find the coldest water you can and splash it on your face.",
                        "This is a distress tolerance skill. It activates the 'dive reflex,' \
                         which slows your heart rate and calms your system.",
                        true,
                    ),
                    option(
                        "s3-c",
                        "Ruminate on all the things that are going wrong.",
                        "This is the opposite of soothing. It's a common pattern, but the goal \
                         is to gently redirect your focus.",
                        false,
                    ),
                ],
            },
        },
        LessonId::Triggers => Lesson {
            id,
            title: "Understanding Triggers",
            summary: "A trigger is anything that sets off an intense emotional reaction because \
                      it reminds you of a past hurt, even if you don't make the connection \
                      consciously. It is never your fault that you have them.",
            try_this: "Gently think about the last time you felt a sudden, big emotion. What was \
                       happening right before? No judgment, just quiet curiosity.",
            reflection_prompt: "What's a situation or type of comment that often makes you feel \
                                defensive or small?",
            scenario: Scenario {
                description: "Your boss gives you some feedback in a neutral tone. You suddenly \
                              feel like you're in huge trouble. What's happening?",
                options: vec![
                    option(
                        "s4-a",
                        "This is an emotional flashback. The feeling is real, but the danger is \
                         likely not.",
                        "Recognizing that the intensity of your feeling belongs to the past is a \
                         huge step.",
                        true,
                    ),
                    option(
                        "s4-b",
                        "My boss is definitely about to fire me.",
                        "This might be what the fear feels like, but it's a conclusion based on \
                         past feelings, not present evidence.",
                        false,
                    ),
                    option(
                        "s4-c",
                        "I am too sensitive and can't handle feedback.",
                        "This is self-invalidation. Your nervous system learned to be on high \
                         alert for danger. That's a sign of survival, not a flaw.",
                        false,
                    ),
                ],
            },
        },
    }
}

/// Every lesson, in display order.
pub fn all_lessons() -> Vec<Lesson> {
    LessonId::ALL.into_iter().map(lesson).collect()
}

/// Result of a lesson practice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LessonOutcome {
    /// Input was too short; nothing was recorded.
    Rejected(Rejection),
    /// The practice was recorded.
    Accepted {
        /// Acknowledgement, scenario explanation, or support reply.
        message: String,
        /// Celebratory message, present only the first time.
        #[serde(skip_serializing_if = "Option::is_none")]
        celebration: Option<String>,
    },
}

/// One lesson being worked through, with its milestones.
#[derive(Debug, Clone)]
pub struct LessonSession {
    lesson: Lesson,
    milestones: MilestoneTracker,
    reflection_policy: AdvancePolicy,
    support_policy: AdvancePolicy,
    reflection: Option<String>,
    chosen_option: Option<&'static str>,
}

impl LessonSession {
    pub fn new(id: LessonId, config: &LessonsConfig) -> Result<Self> {
        Ok(Self {
            lesson: lesson(id),
            milestones: MilestoneTracker::new(LESSON_MILESTONES)?,
            reflection_policy: AdvancePolicy::from_min_length(config.reflection_min_chars),
            support_policy: AdvancePolicy::from_min_length(config.support_min_chars),
            reflection: None,
            chosen_option: None,
        })
    }

    pub fn lesson(&self) -> &Lesson {
        &self.lesson
    }

    pub fn milestones(&self) -> &MilestoneTracker {
        &self.milestones
    }

    /// The last accepted reflection.
    pub fn reflection(&self) -> Option<&str> {
        self.reflection.as_deref()
    }

    /// The last chosen scenario option.
    pub fn chosen_option(&self) -> Option<&ScenarioOption> {
        self.chosen_option
            .and_then(|id| self.lesson.scenario.option(id))
    }

    /// True once every practice has been done at least once.
    pub fn all_complete(&self) -> bool {
        self.milestones.all_complete()
    }

    /// Record a written reflection.
    pub fn submit_reflection(&mut self, text: &str) -> Result<LessonOutcome> {
        if let Err(rejection) =
            CompletionGate::check_policy(self.reflection_policy, text, REFLECTION_REJECTED)
        {
            return Ok(LessonOutcome::Rejected(rejection));
        }

        self.reflection = Some(text.to_string());
        let celebration = self.celebrate(
            MILESTONE_REFLECTED,
            "You practiced self-reflection just now. That's a healing act.",
        )?;
        Ok(LessonOutcome::Accepted {
            message: REFLECTION_THANKS.to_string(),
            celebration,
        })
    }

    /// Pick a scenario response. Unknown option ids are an error.
    pub fn choose_scenario(&mut self, option_id: &str) -> Result<LessonOutcome> {
        let option = self
            .lesson
            .scenario
            .option(option_id)
            .ok_or_else(|| PamojaError::not_found("scenario option", option_id))?;
        let (id, explanation) = (option.id, option.explanation);

        self.chosen_option = Some(id);
        let celebration = self.celebrate(
            MILESTONE_PRACTICED,
            "You practiced noticing a pattern. That's how change begins.",
        )?;
        Ok(LessonOutcome::Accepted {
            message: explanation.to_string(),
            celebration,
        })
    }

    /// Ask the support responder to answer `text`.
    ///
    /// The milestone is only earned when a reply actually arrives.
    pub fn ask_support(
        &mut self,
        text: &str,
        responder: &dyn SupportResponder,
    ) -> Result<LessonOutcome> {
        if let Err(rejection) =
            CompletionGate::check_policy(self.support_policy, text, SUPPORT_REJECTED)
        {
            return Ok(LessonOutcome::Rejected(rejection));
        }

        let reply = responder.respond(self.lesson.id, text)?;
        let celebration = self.celebrate(
            MILESTONE_TALKED,
            "You reached out for support. That's a sign of strength.",
        )?;
        Ok(LessonOutcome::Accepted {
            message: reply,
            celebration,
        })
    }

    fn celebrate(&mut self, milestone: &str, message: &str) -> Result<Option<String>> {
        Ok(match self.milestones.mark_if_first(milestone)? {
            MilestoneOutcome::FirstTime => Some(message.to_string()),
            MilestoneOutcome::Repeat => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::CannedSupport;

    fn session(id: LessonId) -> LessonSession {
        LessonSession::new(id, &LessonsConfig::default()).unwrap()
    }

    fn celebration(outcome: &LessonOutcome) -> Option<&str> {
        match outcome {
            LessonOutcome::Accepted { celebration, .. } => celebration.as_deref(),
            LessonOutcome::Rejected(_) => None,
        }
    }

    #[test]
    fn test_lesson_id_round_trip() {
        for id in LessonId::ALL {
            assert_eq!(id.as_str().parse::<LessonId>().unwrap(), id);
        }
        assert!("grief".parse::<LessonId>().is_err());
    }

    #[test]
    fn test_every_lesson_has_a_helpful_option() {
        for lesson in all_lessons() {
            assert!(lesson.scenario.options.iter().any(|o| o.helpful));
            assert!(!lesson.reflection_prompt.is_empty());
        }
    }

    #[test]
    fn test_short_reflection_rejected() {
        let mut session = session(LessonId::Emotions);
        let outcome = session.submit_reflection(" a ").unwrap();
        assert!(matches!(outcome, LessonOutcome::Rejected(_)));
        assert!(!session.milestones().is_reached(MILESTONE_REFLECTED));
        assert_eq!(session.reflection(), None);
    }

    #[test]
    fn test_reflection_celebrates_once() {
        let mut session = session(LessonId::Emotions);

        let first = session.submit_reflection("anger").unwrap();
        assert!(celebration(&first).is_some());

        let second = session.submit_reflection("sadness too").unwrap();
        assert!(matches!(second, LessonOutcome::Accepted { .. }));
        assert!(celebration(&second).is_none());
        assert_eq!(session.reflection(), Some("sadness too"));
    }

    #[test]
    fn test_scenario_choice_returns_explanation() {
        let mut session = session(LessonId::Splitting);
        let outcome = session.choose_scenario("s2-b").unwrap();
        match outcome {
            LessonOutcome::Accepted {
                message,
                celebration,
            } => {
                assert!(message.contains("dialectical"));
                assert!(celebration.is_some());
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(session.chosen_option().unwrap().helpful);
    }

    #[test]
    fn test_unknown_scenario_option() {
        let mut session = session(LessonId::Splitting);
        assert!(matches!(
            session.choose_scenario("s9-z"),
            Err(PamojaError::NotFound { .. })
        ));
        assert!(!session.milestones().is_reached(MILESTONE_PRACTICED));
    }

    #[test]
    fn test_support_needs_three_characters() {
        let mut session = session(LessonId::Triggers);
        let outcome = session.ask_support("ok", &CannedSupport).unwrap();
        assert_eq!(
            outcome,
            LessonOutcome::Rejected(Rejection::new(SUPPORT_REJECTED))
        );
    }

    #[test]
    fn test_all_three_practices_complete_lesson() {
        let mut session = session(LessonId::SelfSoothe);
        session.submit_reflection("warm tea").unwrap();
        session.choose_scenario("s3-a").unwrap();
        assert!(!session.all_complete());

        let outcome = session.ask_support("I feel wound up", &CannedSupport).unwrap();
        assert!(celebration(&outcome).is_some());
        assert!(session.all_complete());
    }

    #[test]
    fn test_min_chars_come_from_config() {
        let config = LessonsConfig {
            reflection_min_chars: 5,
            support_min_chars: 3,
        };
        let mut session = LessonSession::new(LessonId::Emotions, &config).unwrap();
        assert!(matches!(
            session.submit_reflection("fear").unwrap(),
            LessonOutcome::Rejected(_)
        ));
        assert!(matches!(
            session.submit_reflection("grief").unwrap(),
            LessonOutcome::Accepted { .. }
        ));
    }
}
