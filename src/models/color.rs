use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::RegistryError;

/// 进程日志颜色（在记录生命周期内固定不变）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorToken {
    Magenta,
    Cyan,
    Orange,
    Blue,
    Yellow,
    Purple,
    Teal,
    Rose,
    /// 调用方指定的 256 色索引
    Ansi(u8),
}

/// 默认调色板
pub const PALETTE: [ColorToken; 8] = [
    ColorToken::Magenta,
    ColorToken::Cyan,
    ColorToken::Orange,
    ColorToken::Blue,
    ColorToken::Yellow,
    ColorToken::Purple,
    ColorToken::Teal,
    ColorToken::Rose,
];

impl ColorToken {
    pub fn name(&self) -> String {
        match self {
            ColorToken::Magenta => "magenta".to_string(),
            ColorToken::Cyan => "cyan".to_string(),
            ColorToken::Orange => "orange".to_string(),
            ColorToken::Blue => "blue".to_string(),
            ColorToken::Yellow => "yellow".to_string(),
            ColorToken::Purple => "purple".to_string(),
            ColorToken::Teal => "teal".to_string(),
            ColorToken::Rose => "rose".to_string(),
            ColorToken::Ansi(n) => format!("ansi:{}", n),
        }
    }

    /// 调色板中的十六进制色值，`Ansi` 没有
    pub fn hex(&self) -> Option<&'static str> {
        match self {
            ColorToken::Magenta => Some("#FF00FF"),
            ColorToken::Cyan => Some("#00FFFF"),
            ColorToken::Orange => Some("#FC814A"),
            ColorToken::Blue => Some("#072AC8"),
            ColorToken::Yellow => Some("#FCF300"),
            ColorToken::Purple => Some("#8367C7"),
            ColorToken::Teal => Some("#36827F"),
            ColorToken::Rose => Some("#D6A99A"),
            ColorToken::Ansi(_) => None,
        }
    }

    /// 最接近的 xterm 256 色索引
    pub fn ansi256(&self) -> u8 {
        match self {
            ColorToken::Magenta => 201,
            ColorToken::Cyan => 51,
            ColorToken::Orange => 209,
            ColorToken::Blue => 19,
            ColorToken::Yellow => 226,
            ColorToken::Purple => 98,
            ColorToken::Teal => 30,
            ColorToken::Rose => 181,
            ColorToken::Ansi(n) => *n,
        }
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for ColorToken {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lowered = trimmed.to_ascii_lowercase();

        if let Some(token) = PALETTE
            .iter()
            .find(|c| c.name() == lowered || c.hex().map(|h| h.eq_ignore_ascii_case(trimmed)).unwrap_or(false))
        {
            return Ok(*token);
        }

        let index = lowered.strip_prefix("ansi:").unwrap_or(&lowered);
        index
            .parse::<u8>()
            .map(ColorToken::Ansi)
            .map_err(|_| RegistryError::InvalidColor(s.to_string()))
    }
}

impl Serialize for ColorToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name())
    }
}
