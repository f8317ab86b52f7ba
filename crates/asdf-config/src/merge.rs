//! Deep merging of TOML layers.

/// Deep-merge `overlay` into `base`. Tables merge key by key; any other
/// value in `overlay` replaces the one in `base`.
pub fn deep_merge(base: &mut toml::Value, overlay: &toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                if let Some(base_val) = base_table.get_mut(key) {
                    deep_merge(base_val, overlay_val);
                } else {
                    base_table.insert(key.clone(), overlay_val.clone());
                }
            }
        },
        (base, overlay) => {
            *base = overlay.clone();
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_merge_and_scalars_replace() {
        let mut base: toml::Value = toml::from_str(
            r#"
            data_dir = "~/.asdf"
            [hooks]
            pre_asdf_install_lua = "echo a"
            [logging]
            level = "warn"
            format = "compact"
            "#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
            data_dir = "/opt/asdf"
            [hooks]
            post_asdf_install_lua = "echo b"
            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        deep_merge(&mut base, &overlay);

        assert_eq!(base["data_dir"].as_str(), Some("/opt/asdf"));
        assert_eq!(base["hooks"]["pre_asdf_install_lua"].as_str(), Some("echo a"));
        assert_eq!(base["hooks"]["post_asdf_install_lua"].as_str(), Some("echo b"));
        assert_eq!(base["logging"]["level"].as_str(), Some("debug"));
        assert_eq!(base["logging"]["format"].as_str(), Some("compact"));
    }
}
