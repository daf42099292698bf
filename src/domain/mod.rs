//! Domain Layer - 领域层
//!
//! 纯值逻辑，不依赖基础设施:
//! - sanitizer: 合成文本净化（截断、去标记、折叠换行）
//! - voice: 语音偏好与供应商音色映射
//! - artifact: 音频制品标识与记录

pub mod artifact;
pub mod sanitizer;
pub mod voice;

pub use artifact::{ArtifactId, AudioArtifact};
pub use sanitizer::{sanitize_default, sanitize_for_speech, SanitizeConfig};
pub use voice::{SpeechFormat, VoicePreference, VoiceProfile};
