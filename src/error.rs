//! Error types for loading an ontology into the graph model.

use crate::rdf::RdfDialect;

/// Everything that can go wrong between picking a file and drawing its graph.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
	/// Content is neither RDF/XML nor Turtle.
	#[error("Unrecognized file format. Please upload a valid RDF/XML or Turtle file.")]
	UnrecognizedFormat,

	/// The dialect-specific parser rejected the content.
	#[error("Failed to parse {dialect} content: {message}")]
	ParseFailure {
		/// Dialect the content was sniffed as.
		dialect: RdfDialect,
		/// Parser diagnostic.
		message: String,
	},

	/// Parsing succeeded but produced no nodes.
	#[error("The file was parsed but contains no resources to visualize.")]
	EmptyGraph,

	/// The selected file could not be read as text.
	#[error("Could not read the selected file: {0}")]
	Read(String),
}

/// Result alias for loading operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
	/// Create a parse failure for `dialect`.
	pub fn parse(dialect: RdfDialect, message: impl Into<String>) -> Self {
		Self::ParseFailure {
			dialect,
			message: message.into(),
		}
	}
}
