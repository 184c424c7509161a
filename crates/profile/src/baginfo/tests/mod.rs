use super::*;

#[test]
fn labels_and_values() -> Result<(), BagInfoError> {
    let fields = parse(
        "Source-Organization: Example University\n\
         Contact-Email: archivist@example.edu\n\
         Bagging-Date:2016-12-12\n",
    )?;

    assert_eq!(fields.len(), 3);
    assert_eq!(fields["Source-Organization"], "Example University");
    assert_eq!(fields["Contact-Email"], "archivist@example.edu");
    assert_eq!(fields["Bagging-Date"], "2016-12-12");
    Ok(())
}

#[test]
fn continuation_lines() -> Result<(), BagInfoError> {
    let fields = parse(
        "External-Description: A long description\n   that wraps onto\n\tthree lines\nTitle: Letters\n",
    )?;
    assert_eq!(
        fields["External-Description"],
        "A long description that wraps onto three lines"
    );
    assert_eq!(fields["Title"], "Letters");
    Ok(())
}

#[test]
fn values_may_contain_colons() -> Result<(), BagInfoError> {
    let fields = parse("External-Identifier: ark:/13030/xt12t3\r\n\r\nTitle: A: B\r\n")?;
    assert_eq!(fields["External-Identifier"], "ark:/13030/xt12t3");
    assert_eq!(fields["Title"], "A: B");
    Ok(())
}

#[test]
fn last_value_wins() -> Result<(), BagInfoError> {
    let fields = parse("Access: Consortia\nAccess: Restricted\n")?;
    assert_eq!(fields["Access"], "Restricted");
    Ok(())
}

#[test]
fn malformed() {
    assert_eq!(
        parse("Title: ok\nno separator here\n"),
        Err(BagInfoError::MissingSeparator { line: 2 })
    );
    assert_eq!(
        parse("  orphaned continuation\n"),
        Err(BagInfoError::DanglingContinuation { line: 1 })
    );
    assert_eq!(
        parse("\n: no label\n"),
        Err(BagInfoError::EmptyLabel { line: 2 })
    );
}

#[test]
fn empty_input() {
    assert_eq!(parse(""), Ok(Fields::new()));
}
