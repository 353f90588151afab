mod client;
mod config;
mod jellyfin;

use client::{Client, REPL_PROP_TIME};

use std::os::raw::c_int;

use mpv_client::{mpv_handle, Event};

#[no_mangle]
extern "C" fn mpv_open_cplugin(handle: *mut mpv_handle) -> c_int {
    env_logger::init();

    let mut client = Client::from_ptr(handle);

    log::info!("Starting plugin Intro Skipper [{}]!", client.client_name());

    loop {
        match client.wait_event(-1.) {
            Event::StartFile { .. } => {
                log::trace!("Received start-file event");
                client.start_file();
            }
            Event::PropertyChange(REPL_PROP_TIME, property) => {
                if let Some(time_pos) = property.data() {
                    client.time_change(time_pos);
                }
            }
            Event::ClientMessage(message) => {
                log::trace!("Received client-message event");
                let args = message.args();
                let args: Vec<&str> = args.iter().map(String::as_str).collect();
                client.client_message(&args);
            }
            Event::EndFile { .. } => {
                log::trace!("Received end-file event");
                client.end_file();
            }
            Event::Shutdown => {
                log::trace!("Received shutdown event");
                return 0;
            }
            _ => {}
        }
    }
}
