use super::*;

#[test]
fn encode_reserved() {
    assert_eq!(encode("/rest/a:b c/d"), "/rest/a%3Ab+c/d");
    assert_eq!(encode("plain-name_1.txt"), "plain-name_1.txt");
    assert_eq!(encode("100%+?#"), "100%25%2B%3F%23");
    assert_eq!(encode("café"), "caf%C3%A9");
}

#[test]
fn round_trip() -> Result<(), PathError> {
    let paths = [
        "",
        "/",
        "/rest/container/child",
        "/rest/a:b",
        "with space/and+plus",
        "100%/literal%2F",
        "?query&x=1#frag",
        "unicode/λ/汉字",
        "trailing/",
    ];
    for path in paths {
        assert_eq!(decode(&encode(path))?, path);
    }
    Ok(())
}

#[test]
fn decode_form() -> Result<(), PathError> {
    assert_eq!(decode("a+b")?, "a b");
    assert_eq!(decode("a%2Bb")?, "a+b");
    assert_eq!(decode("a%2fb")?, "a/b");
    Ok(())
}

#[test]
fn decode_malformed() {
    assert_eq!(
        decode("bad%zz"),
        Err(PathError::MalformedEscape {
            input: "bad%zz".into(),
            position: 3
        })
    );
    assert!(matches!(
        decode("truncated%4"),
        Err(PathError::MalformedEscape { position: 9, .. })
    ));
    assert!(matches!(
        decode("%"),
        Err(PathError::MalformedEscape { position: 0, .. })
    ));
    assert!(matches!(decode("%FF%FE"), Err(PathError::InvalidUtf8(_))));
}

#[test]
fn binary_file() -> anyhow::Result<()> {
    let uri = Url::parse("http://localhost:8080/rest/a:b")?;
    let root = Path::new("/export/binaries");
    assert_eq!(
        file_for_binary(&uri, root)?,
        Path::new("/export/binaries/rest/a%3Ab.binary")
    );
    Ok(())
}

#[test]
fn container_file() -> anyhow::Result<()> {
    let uri = Url::parse("http://localhost:8080/rest/my%20container")?;
    let root = Path::new("export");
    assert_eq!(
        file_for_container(&uri, root, ".jsonld")?,
        Path::new("export/rest/my+container.jsonld")
    );
    assert_eq!(
        directory_for_container(&uri, root)?,
        Path::new("export/rest/my+container")
    );
    Ok(())
}

#[test]
fn container_paths_stay_under_root() -> anyhow::Result<()> {
    let root = Path::new("/export");
    for uri in [
        "http://localhost/",
        "http://localhost//double",
        "http://localhost/a/../../b",
    ] {
        let dir = directory_for_container(&Url::parse(uri)?, root)?;
        assert!(dir.starts_with(root), "{} escaped to {}", uri, dir.display());
    }
    Ok(())
}
