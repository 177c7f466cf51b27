// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

#[cfg(test)]
mod tests {
    use crate::common::Error;
    use crate::log::StringLogger;

    #[test]
    fn logger_tests() {
        let log1 = StringLogger::default();
        let bar = 123;
        log1.trace(format!("foo {bar}"));
        log1.trace(String::new());
        log1.trace(format!("bar {bar}"));
        assert_eq!(log1.to_string(), "foo 123\nbar 123");
        assert!(!log1.contains_warnings());

        log1.warn("this is a warning".to_string());
        assert!(log1.contains_warnings());
        assert_eq!(log1.warnings(), vec!["this is a warning".to_string()]);

        let shared = log1.clone();
        shared.trace("shared".to_string());
        assert_eq!(log1.lines().len(), 4);

        let log2 = StringLogger::new(false);
        log2.extend(&log1);
        log2.extend(&log2.clone());
        assert_eq!(log2.lines(), log1.lines());
    }

    #[test]
    fn call_tests() {
        let logger = StringLogger::default();
        let ok: Result<u8, Error> = Ok(1);
        assert_eq!(logger.call("step one".to_string(), ok).ok(), Some(1));
        let err: Result<u8, Error> = Err(Error::String("broken".to_string()));
        assert!(logger.call("step two".to_string(), err).is_err());
        assert_eq!(
            logger.lines(),
            vec![
                "step one succeeded".to_string(),
                "step two failed: broken".to_string()
            ]
        );
        assert_eq!(logger.warnings(), vec!["step two failed: broken".to_string()]);
    }
}
