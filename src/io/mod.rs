//! Objects used to read Argumentation frameworks and write answers to problems.

mod aspartix_reader;
pub use aspartix_reader::AspartixReader;

mod iccma23_reader;
pub use iccma23_reader::Iccma23Reader;

mod iccma23_writer;
pub use iccma23_writer::Iccma23Writer;

mod specs;
pub use specs::InstanceReader;
pub use specs::ResponseWriter;
pub use specs::WarningHandler;

mod tgf_reader;
pub use tgf_reader::TgfReader;
