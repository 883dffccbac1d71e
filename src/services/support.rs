//! Canned lesson support replies.

use crate::catalog::lessons::LessonId;
use crate::error::Result;
use crate::services::SupportResponder;

/// Responder that answers with one fixed, gentle reply per lesson.
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedSupport;

impl CannedSupport {
    pub fn reply_for(lesson: LessonId) -> &'static str {
        match lesson {
            LessonId::Emotions => {
                "Thank you for sharing that. It takes courage to name a feeling that has been \
                 judged. Remember, your feelings are messengers, not monsters. They are all \
                 allowed to be here."
            }
            LessonId::Splitting => {
                "That makes so much sense. The black-and-white world can feel safer than the \
                 gray one. Noticing that pattern is a huge step toward finding balance. You're \
                 doing the work."
            }
            LessonId::SelfSoothe => {
                "It's wonderful that you know what brings you a little bit of calm. That's a \
                 powerful tool you can always carry with you."
            }
            LessonId::Triggers => {
                "Thank you for being brave enough to look at that. Triggers are like echoes \
                 from the past. Just because they are loud doesn't mean the danger is still \
                 here. You are safe now."
            }
        }
    }
}

impl SupportResponder for CannedSupport {
    fn respond(&self, lesson: LessonId, text: &str) -> Result<String> {
        tracing::debug!(lesson = %lesson, chars = text.chars().count(), "support requested");
        Ok(Self::reply_for(lesson).to_string())
    }
}
