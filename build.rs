use vergen_gitcl::{CargoBuilder, Emitter, GitclBuilder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
	let mut emitter = Emitter::default();

	emitter.add_instructions(&CargoBuilder::all_cargo()?)?;

	// Disable the git version if installed from <crates.io>.
	if emitter.add_instructions(&GitclBuilder::all_git()?).is_err() {
		println!("cargo:rustc-env=VERGEN_GIT_SHA=crates.io");
	}

	emitter.emit()?;

	Ok(())
}
