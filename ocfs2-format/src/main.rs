use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    if ocfs2_format::run()? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
