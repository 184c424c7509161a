use profile::Profile;

pub(super) fn run(profile: Profile) -> Result<(), serde_json::Error> {
    tracing::debug!(
        profile = profile.name(),
        base = profile.base_profile(),
        "showing profile"
    );
    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}
