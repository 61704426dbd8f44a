mod bot;
mod community;
mod embed;
mod guild;
mod panel;
mod ticket;
mod user;
