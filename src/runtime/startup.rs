use crate::app::{Action, Session};
use crate::audio::AudioBackend;
use crate::library::scan_all;

/// Import the files and directories named on the command line.
pub fn import_args<B: AudioBackend>(session: &mut Session<B>, args: &[String]) {
    if args.is_empty() {
        return;
    }
    let files = scan_all(args, session.library_settings());
    log::info!("startup: {} file(s) from {} argument(s)", files.len(), args.len());
    session.dispatch(Action::AddFiles(files));
}
