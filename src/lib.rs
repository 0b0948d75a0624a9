//! # webpane — une fenêtre, une page
//!
//! Affiche une fenêtre native dont l'unique contenu est une surface web Servo
//! chargeant une URL fixe. Fermer la fenêtre termine le processus.
//!
//! ## Architecture des modules
//!
//! - [`lifecycle`] : contrôleur `Uninitialized → Constructed → Running → Terminated`
//!   et contrats fenêtre/surface indépendants du backend.
//!
//! - [`window`], [`rendering`] : fenêtre winit et son contexte GL.
//!
//! - [`surface`] : surface Servo, navigation mise en attente jusqu'à l'attachement.
//!
//! - [`servo_glue`] : `Waker` (threads Servo → boucle winit, fermeture → sortie)
//!   et `WebViewDelegate`.
//!
//! - [`platform`], [`app`], [`runtime`] : fabrique winit/Servo, handler winit,
//!   boucle d'événements du processus.
//!
//! - [`input`] : conversion des événements pointeur winit vers Servo.
//!
//! - [`config`], [`preferences`], [`resources`] : configuration TOML,
//!   préférences Servo, lecteur de ressources.

pub mod app;
pub mod config;
pub mod error;
pub mod input;
pub mod lifecycle;
pub mod platform;
pub mod preferences;
pub mod rendering;
pub mod resources;
pub mod runtime;
pub mod servo_glue;
pub mod surface;
pub mod window;

pub use error::LaunchError;
pub use runtime::launch;
