//! User-facing prompt and report text.

pub const DIALOG_TITLE: &str = "Convert material to lilToon";

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Language {
    #[default]
    English,
    Japanese,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Text {
    Ok,
    Cancel,
    Yes,
    No,
    BeforeConvert,
    ConvertAoMask,
    UnsupportedShader,
    Complete,
}

impl Language {
    /// Japanese when the first set locale variable says so.
    pub fn detect() -> Self {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.is_empty())
            .map_or(Self::English, |locale| Self::from_locale(&locale))
    }

    pub fn from_locale(locale: &str) -> Self {
        if locale.starts_with("ja") {
            Self::Japanese
        } else {
            Self::English
        }
    }

    pub fn text(self, text: Text) -> &'static str {
        use Language::*;
        match (text, self) {
            (Text::Ok, _) => "OK",
            (Text::Cancel, English) => "Cancel",
            (Text::Cancel, Japanese) => "キャンセル",
            (Text::Yes, English) => "Yes",
            (Text::Yes, Japanese) => "はい",
            (Text::No, English) => "No",
            (Text::No, Japanese) => "いいえ",
            (Text::BeforeConvert, English) => {
                "Are you sure you want to convert the material?\n(It is recommended to make a backup before conversion)"
            }
            (Text::BeforeConvert, Japanese) => {
                "マテリアルの変換を実行しますか？\n（変換前にマテリアルのバックアップを取っておくことをオススメします）"
            }
            (Text::ConvertAoMask, English) => "Do you want to convert AO Mask?",
            (Text::ConvertAoMask, Japanese) => "AOマスクを変換しますか？",
            (Text::UnsupportedShader, English) => {
                "Skipped conversion of materials using unsupported shaders."
            }
            (Text::UnsupportedShader, Japanese) => {
                "非対応のシェーダーを使用しているマテリアルの変換をスキップしました。"
            }
            (Text::Complete, English) => "Complete!",
            (Text::Complete, Japanese) => "完了しました",
        }
    }

    /// The aggregate message listing every skipped material, one per line.
    pub fn unsupported_report(self, names: &[String]) -> String {
        let mut lines = vec![self.text(Text::UnsupportedShader).to_owned()];
        lines.extend(names.iter().cloned());
        lines.join("\n")
    }
}
