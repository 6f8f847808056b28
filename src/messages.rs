use std::collections::HashMap;
use std::sync::LazyLock;

use crate::errors::TimerError;

/// Echoes every message key back verbatim. Useful when checking which key
/// ends up where without squinting at a real language.
pub const TEST_LANGUAGE: &str = "test";

pub const KEY_PROGRESS_TITLE: &str = "timer-progress";
pub const KEY_FINISHED_TITLE: &str = "timer-finished";

type Table = HashMap<&'static str, &'static str>;

static TRANSLATIONS: LazyLock<HashMap<&'static str, Table>> = LazyLock::new(|| {
    let mut tables = HashMap::new();

    // English
    tables.insert(
        "en",
        HashMap::from([
            (KEY_PROGRESS_TITLE, "This timer will expire in"),
            (KEY_FINISHED_TITLE, "This timer has been expired since"),
            ("months", "Months"),
            ("days", "Days"),
            ("hours", "Hours"),
            ("minutes", "Minutes"),
            ("seconds", "Seconds"),
            (
                "message-deletion-progress",
                "This page will be eligible for deletion in",
            ),
            (
                "message-deletion-finished",
                "This page has been eligible for deletion since",
            ),
            ("message-translation-progress", "倒數計時器翻譯"),
            ("message-translation-finished", "本翻譯已超過符合被刪除期限"),
            ("message-ban-progress", "This user's ban will elapse in"),
            (
                "message-ban-finished",
                "This user's ban has been expired since",
            ),
            (
                "template-deletion",
                "Beginning deletion vote at -10.\n\n%%iframe%%\n\nIf this article is over a year old, you are not the author, and you want to rewrite this article, request to do so in the [/forum/t-14018096/rewrite-request-thread#post-4916192 Rewrite Request Thread]. Please request permission from the author and make sure you copy the page source to your sandbox. **Do not reply to this post unless you are staff.**",
            ),
            ("template-translation", "翻譯測試文字"),
            ("template-ban", "%%iframe%%"),
            ("error-missing", "Please make a selection in each section first."),
        ]),
    );

    // Pig Latin
    tables.insert(
        "pig",
        HashMap::from([
            (KEY_PROGRESS_TITLE, "Isthay imertay illway expireyay inyay"),
            (
                KEY_FINISHED_TITLE,
                "Isthay imertay ashay eenbay expiredyay incesay",
            ),
            ("months", "Onthsmay"),
            ("days", "Aysday"),
            ("hours", "Ourshay"),
            ("minutes", "Inutesmay"),
            ("seconds", "Econdssay"),
            (
                "message-deletion-progress",
                "Isthay agepay illway ebay eligibleyay orfay eletionday inyay",
            ),
            (
                "message-deletion-finished",
                "Isthay agepay ashay eenbay eligibleyay orfay eletionday incesay",
            ),
            ("message-translation-progress", "倒數計時器翻譯"),
            ("message-translation-finished", "本翻譯已超過符合被刪除期限"),
            (
                "message-ban-progress",
                "Isthay user'syay anbay illway elapseyay inyay",
            ),
            (
                "message-ban-finished",
                "Isthay user'syay anbay ashay eenbay expiredyay incesay",
            ),
            (
                "template-deletion",
                "Eginningbay eletionday otevay atyay -10.\n\n%%iframe%%\n\nIfyay isthay articleyay isyay overyay ayay earyay oldyay, ouyay areyay otnay ethay authoryay, andyay ouyay antway otay ewriteray isthay articleyay, equestray otay oday osay inyay ethay [/forum/t-14018096/rewrite-request-thread#post-4916192 Ewriteray Equestray Eadthray]. Easeplay equestray ermissionpay omfray ehtay authoryay andyay akemay uresay ouyay opycay ehtay agepay ourcesay otay ouryay andboxsay. **Oday otnay eplyray otay isthay ostay unlessyay ouyay areyay affstay.**",
            ),
            ("template-translation", "翻譯測試文字"),
            ("template-ban", "%%iframe%%"),
            (
                "error-missing",
                "Easeplay akemay ayay electionsay inyay eachyay ectionsay irstfay.",
            ),
        ]),
    );

    // Traditional Chinese
    tables.insert(
        "zh",
        HashMap::from([
            (KEY_PROGRESS_TITLE, "該計時器將於以下倒數結束後到期"),
            (KEY_FINISHED_TITLE, "該計時器現已到期"),
            ("months", "月"),
            ("days", "天"),
            ("hours", "小時"),
            ("minutes", "分鐘"),
            ("seconds", "秒"),
            ("message-deletion-progress", "倒數計時器"),
            ("message-deletion-finished", "本文已超過符合被刪除期限"),
            ("message-translation-progress", "倒數計時器翻譯"),
            ("message-translation-finished", "本翻譯已超過符合被刪除期限"),
            ("message-ban-progress", "該名用戶將在倒數結束後解除封禁"),
            ("message-ban-finished", "對該名用戶的封禁已到期"),
            (
                "template-deletion",
                "%%iframe%%\n\n本文將會於上述計時器歸零，又仍未回上至超過-2分時被刪除，敬請留意。",
            ),
            ("template-translation", "翻譯測試文字"),
            ("template-ban", "%%iframe%%"),
            ("error-missing", "Please make a selection in each section first."),
        ]),
    );

    tables
});

/// Look up a message for a language.
///
/// Unknown languages and unknown keys are distinct fatal errors so the user
/// knows which half of the lookup to fix.
pub fn get_message(language: &str, key: &str) -> Result<String, TimerError> {
    if language == TEST_LANGUAGE {
        return Ok(key.to_string());
    }

    let table = TRANSLATIONS
        .get(language)
        .ok_or_else(|| TimerError::NoTranslations {
            language: language.to_string(),
        })?;

    let message = table.get(key).ok_or_else(|| TimerError::NoSuchMessage {
        language: language.to_string(),
        key: key.to_string(),
    })?;

    Ok((*message).to_string())
}

/// Languages with a full message table, sorted. The `test` language is not
/// listed; it is an echo, not a translation.
pub fn supported_languages() -> Vec<&'static str> {
    let mut languages: Vec<&'static str> = TRANSLATIONS.keys().copied().collect();
    languages.sort_unstable();
    languages
}

#[cfg(test)]
mod tests {
    use crate::countdown::Unit;

    use super::*;

    #[test]
    fn english_lookup_works() {
        assert_eq!(
            get_message("en", KEY_PROGRESS_TITLE).unwrap(),
            "This timer will expire in"
        );
        assert_eq!(get_message("en", "months").unwrap(), "Months");
    }

    #[test]
    fn unknown_language_is_distinct_error() {
        let err = get_message("xx", "months").unwrap_err();
        assert_eq!(
            err,
            TimerError::NoTranslations {
                language: "xx".to_string()
            }
        );
    }

    #[test]
    fn unknown_key_is_distinct_error() {
        let err = get_message("en", "nope").unwrap_err();
        assert_eq!(
            err,
            TimerError::NoSuchMessage {
                language: "en".to_string(),
                key: "nope".to_string()
            }
        );
    }

    #[test]
    fn test_language_echoes_keys() {
        assert_eq!(get_message(TEST_LANGUAGE, "months").unwrap(), "months");
        assert_eq!(
            get_message(TEST_LANGUAGE, "anything-at-all").unwrap(),
            "anything-at-all"
        );
    }

    #[test]
    fn every_language_carries_the_renderer_keys() {
        for language in supported_languages() {
            for unit in Unit::DESCENDING {
                get_message(language, unit.label_key())
                    .unwrap_or_else(|_| panic!("{language} lacks {}", unit.label_key()));
            }
            get_message(language, KEY_PROGRESS_TITLE).unwrap();
            get_message(language, KEY_FINISHED_TITLE).unwrap();
        }
    }

    #[test]
    fn every_language_carries_the_builder_preset_keys() {
        let preset_keys = [
            "message-deletion-progress",
            "message-deletion-finished",
            "message-translation-progress",
            "message-translation-finished",
            "message-ban-progress",
            "message-ban-finished",
            "template-deletion",
            "template-translation",
            "template-ban",
            "error-missing",
        ];

        for language in supported_languages() {
            for key in preset_keys {
                get_message(language, key)
                    .unwrap_or_else(|_| panic!("{language} lacks {key}"));
            }
        }
    }

    #[test]
    fn supported_languages_are_sorted() {
        assert_eq!(supported_languages(), vec!["en", "pig", "zh"]);
    }
}
