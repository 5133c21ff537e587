//! Integration tests for configuration parsing and validation.

use memory_refmodel::config::{parse_hex, Config, ConfigError, ModelConfig};
use memory_refmodel::ModelError;

/// Tests the documented default parameters.
#[test]
fn test_default_model_config() {
    let cfg = ModelConfig::default();
    assert_eq!(cfg.virt_addr_width, 32);
    assert_eq!(cfg.phys_addr_width, 28);
    assert_eq!(cfg.page_size, 4096);
    assert_eq!(cfg.data_width, 64);
    assert_eq!(cfg.mem_depth, 16384);
    assert_eq!(cfg.tlb_entries, 256);
    assert_eq!(cfg.bytes_per_word(), 8);
    assert_eq!(cfg.page_offset_bits(), 12);
    assert_eq!(cfg.validate(), Ok(()));
}

/// Tests that unsupported data widths are rejected as unsupported.
#[test]
fn test_validate_data_width() {
    for width in [0, 12, 72, 128] {
        let cfg = ModelConfig {
            data_width: width,
            ..ModelConfig::default()
        };
        assert!(
            matches!(cfg.validate(), Err(ModelError::Unsupported(_))),
            "data width {} should be unsupported",
            width
        );
    }
    for width in [8, 16, 24, 32, 40, 48, 56, 64] {
        let cfg = ModelConfig {
            data_width: width,
            ..ModelConfig::default()
        };
        assert_eq!(cfg.validate(), Ok(()));
    }
}

/// Tests that the page size must be a non-zero power of two.
#[test]
fn test_validate_page_size() {
    for page_size in [0, 3, 4095, 6000] {
        let cfg = ModelConfig {
            page_size,
            ..ModelConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ModelError::BadArgument("page size must be a power of two"))
        );
    }
}

/// Tests that zero depth and zero TLB capacity are rejected.
#[test]
fn test_validate_zero_sizes() {
    let cfg = ModelConfig {
        mem_depth: 0,
        ..ModelConfig::default()
    };
    assert!(matches!(cfg.validate(), Err(ModelError::BadArgument(_))));

    let cfg = ModelConfig {
        tlb_entries: 0,
        ..ModelConfig::default()
    };
    assert!(matches!(cfg.validate(), Err(ModelError::BadArgument(_))));
}

/// Tests address width bounds.
#[test]
fn test_validate_address_widths() {
    for (virt, phys) in [(0, 28), (65, 28), (32, 0), (32, 65)] {
        let cfg = ModelConfig {
            virt_addr_width: virt,
            phys_addr_width: phys,
            ..ModelConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ModelError::BadArgument(_))));
    }

    let cfg = ModelConfig {
        virt_addr_width: 64,
        phys_addr_width: 64,
        ..ModelConfig::default()
    };
    assert_eq!(cfg.validate(), Ok(()));
}

/// Tests that a page larger than either address space is rejected.
#[test]
fn test_validate_page_exceeds_address_space() {
    let cfg = ModelConfig {
        virt_addr_width: 11,
        ..ModelConfig::default()
    };
    assert_eq!(
        cfg.validate(),
        Err(ModelError::BadArgument("page size exceeds the address space"))
    );

    let cfg = ModelConfig {
        phys_addr_width: 8,
        ..ModelConfig::default()
    };
    assert!(matches!(cfg.validate(), Err(ModelError::BadArgument(_))));

    // A page exactly as large as the address space is allowed.
    let cfg = ModelConfig {
        virt_addr_width: 12,
        phys_addr_width: 12,
        ..ModelConfig::default()
    };
    assert_eq!(cfg.validate(), Ok(()));
}

/// Tests that the data-width check runs before every other check.
#[test]
fn test_validate_order() {
    let cfg = ModelConfig {
        data_width: 7,
        page_size: 3,
        mem_depth: 0,
        virt_addr_width: 0,
        ..ModelConfig::default()
    };
    assert!(matches!(cfg.validate(), Err(ModelError::Unsupported(_))));

    let cfg = ModelConfig {
        page_size: 3,
        mem_depth: 0,
        ..ModelConfig::default()
    };
    assert_eq!(
        cfg.validate(),
        Err(ModelError::BadArgument("page size must be a power of two"))
    );

    let cfg = ModelConfig {
        mem_depth: 0,
        virt_addr_width: 0,
        ..ModelConfig::default()
    };
    assert_eq!(
        cfg.validate(),
        Err(ModelError::BadArgument("memory depth must be non-zero"))
    );
}

/// Tests hex string parsing.
#[test]
fn test_parse_hex() {
    assert_eq!(parse_hex("0x1000"), Some(0x1000));
    assert_eq!(parse_hex("0XFF"), Some(0xFF));
    assert_eq!(parse_hex("ff"), Some(0xFF));
    assert_eq!(parse_hex("0xFFEE_DDCC"), Some(0xFFEE_DDCC));
    assert_eq!(parse_hex("0xzz"), None);
}

/// Tests that an empty document yields the defaults.
#[test]
fn test_parse_empty_toml() {
    let config = Config::from_toml_str("").unwrap();
    assert_eq!(config.model, ModelConfig::default());
    assert!(!config.general.trace_transactions);
    assert_eq!(config.general.log_filter, "info");
}

/// Tests a partial model table mixing integers and hex strings.
#[test]
fn test_parse_partial_toml() {
    let text = r#"
        [general]
        trace_transactions = true

        [model]
        page_size = "0x100"
        tlb_entries = 4
    "#;
    let config = Config::from_toml_str(text).unwrap();
    assert!(config.general.trace_transactions);
    assert_eq!(config.model.page_size, 0x100);
    assert_eq!(config.model.tlb_entries, 4);
    assert_eq!(config.model.virt_addr_width, 32);
    assert_eq!(config.model.mem_depth, 16384);
}

/// Tests that invalid parameters are reported after a successful parse.
#[test]
fn test_parse_invalid_model() {
    let err = Config::from_toml_str("[model]\npage_size = 3000\n").unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Invalid(ModelError::BadArgument(_))
    ));
}

/// Tests that malformed values are parse errors.
#[test]
fn test_parse_malformed_value() {
    let err = Config::from_toml_str("[model]\npage_size = \"0xqq\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));

    let err = Config::from_toml_str("[model]\ntlb_entries = \"0x100000000\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

/// Tests that a missing file is an I/O error naming the path.
#[test]
fn test_missing_config_file() {
    let err = Config::from_file("does/not/exist.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(format!("{}", err).contains("does/not/exist.toml"));
}

/// Tests that the shipped configuration matches the defaults.
#[test]
fn test_shipped_default_config() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/configs/default.toml");
    let config = Config::from_file(path).unwrap();
    assert_eq!(config.model, ModelConfig::default());
}
